pub mod errors;

pub use errors::ElementError;

use crate::keys::Key;

/// A reference to a page element, as exposed by the browser collaborator.
///
/// Queries reflect live page state; nothing here is cached.
pub trait ElementHandle: Send + Sync {
    fn id(&self) -> &str;

    fn is_displayed(&self) -> Result<bool, ElementError>;

    fn is_enabled(&self) -> Result<bool, ElementError>;

    /// Whether the element is a file-selection control (`<input type="file">`)
    fn is_file_input(&self) -> Result<bool, ElementError>;

    /// Ask the page to move focus to the element. Focus may arrive later.
    fn focus(&self) -> Result<(), ElementError>;

    fn is_focused(&self) -> Result<bool, ElementError>;

    /// Number of caret positions in the element's content, or `None` when the
    /// element exposes no way to position a caret.
    fn content_length(&self) -> Result<Option<usize>, ElementError>;

    fn set_caret(&self, offset: usize) -> Result<(), ElementError>;

    /// Deliver one key event, observable by the page's handlers.
    fn send_key(&self, key: Key) -> Result<(), ElementError>;

    /// Activate the element. For file inputs this opens the native dialog and
    /// may not return until the dialog is dismissed.
    fn click(&self) -> Result<(), ElementError>;

    /// Set a file input's value without a native dialog.
    ///
    /// Returns `Ok(false)` when the element does not accept direct assignment.
    fn assign_file_value(&self, _path: &str) -> Result<bool, ElementError> {
        Ok(false)
    }
}
