use crate::models::Account;
use crate::storage::{Storage, StorageError};
use crate::types::MAX_ACCOUNTS;
use csv::{QuoteStyle, StringRecord, WriterBuilder};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const DELIMITER: u8 = b' ';
const FIELDS_PER_RECORD: usize = 5;

/// Plain text ledger, one account per line:
///
/// ```text
/// <identifier> <first_name> <last_name> <balance> <password>
/// ```
///
/// Fields never contain whitespace, names are single tokens. Every save
/// rewrites the whole file. Nothing protects against a crash in
/// the middle of a write, the last complete rewrite is what the next run sees.
pub struct LedgerFile {
    path: PathBuf
}

impl LedgerFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into()
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for LedgerFile {
    fn load(&self) -> Result<Vec<Account>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                info!("No ledger at {}, starting empty", self.path().display());
                return Ok(Vec::new())
            }
            Err(error) => return Err(error.into())
        };

        //NOTE: Fields are whitespace-separated tokens, so line breaks, tabs and repeated spaces all count as one separator
        let tokens: Vec<&str> = contents.split_whitespace().collect();
        let mut accounts = Vec::new();

        //NOTE: Reading stops at the first bad record, everything before it is kept
        for (number, fields) in tokens.chunks(FIELDS_PER_RECORD).enumerate() {
            if accounts.len() >= MAX_ACCOUNTS {
                warn!("Ledger {} holds more than {MAX_ACCOUNTS} accounts, ignoring the rest", self.path().display());
                break;
            }

            if fields.len() < FIELDS_PER_RECORD {
                warn!("Stopped reading ledger {} at record {}: truncated record", self.path().display(), number + 1);
                break;
            }

            match StringRecord::from(fields).deserialize::<Account>(None) {
                Ok(account) => accounts.push(account),
                Err(error) => {
                    warn!("Stopped reading ledger {} at record {}: {error}", self.path().display(), number + 1);
                    break;
                }
            }
        }

        info!("Loaded {} accounts from {}", accounts.len(), self.path().display());

        Ok(accounts)
    }

    fn save(&self, accounts: &[Account]) -> Result<(), StorageError> {
        let mut writer = WriterBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .quote_style(QuoteStyle::Never)
            .from_path(&self.path)?;

        for account in accounts {
            writer.serialize(account)?;
        }

        writer.flush()?;

        debug!("Saved {} accounts to {}", accounts.len(), self.path().display());

        Ok(())
    }
}
