//! Minimales Command-Log der erfolgreich ausgeführten Bearbeitungen.

use super::EditCommand;

/// Speichert ausgeführte Commands in Reihenfolge.
#[derive(Debug, Default)]
pub struct CommandLog {
    entries: Vec<EditCommand>,
}

impl CommandLog {
    const MAX_ENTRIES: usize = 1000;

    /// Erstellt ein leeres Command-Log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fügt einen ausgeführten Command hinzu.
    /// Ist das Log voll, wird die ältere Hälfte verworfen.
    pub fn record(&mut self, command: EditCommand) {
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.drain(..Self::MAX_ENTRIES / 2);
        }
        self.entries.push(command);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read-only Sicht auf alle Einträge.
    pub fn entries(&self) -> &[EditCommand] {
        &self.entries
    }

    /// Der zuletzt ausgeführte Command.
    pub fn last(&self) -> Option<&EditCommand> {
        self.entries.last()
    }
}
