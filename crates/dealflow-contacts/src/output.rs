use std::path::Path;

use crate::error::ContactsError;
use crate::types::Contact;

/// Write contacts as CSV with a header row. Columns follow [`Contact`]'s
/// field order.
///
/// # Errors
///
/// Returns [`ContactsError::Csv`] if the file cannot be created or written.
pub fn write_contacts_csv(path: &Path, contacts: &[Contact]) -> Result<(), ContactsError> {
    let mut writer = csv::Writer::from_path(path)?;
    for contact in contacts {
        writer.serialize(contact)?;
    }
    writer.flush().map_err(|source| ContactsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
