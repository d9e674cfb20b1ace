use crate::storage::AccountStore;
use std::io::{self, BufWriter, Write};

/// Read-only overview of every account, one comma-separated row each.
/// Passwords are never part of the listing.
pub fn write_account_listing<W: Write>(store: &AccountStore, output: W) -> io::Result<()> {
    let mut output = BufWriter::new(output);

    writeln!(output, "identifier,first_name,last_name,balance")?;

    for account in store.accounts() {
        writeln!(
            output,
            "{},{},{},{}",
            account.identifier,
            account.first_name,
            account.last_name,
            account.balance()
        )?;
    }

    output.flush()
}
