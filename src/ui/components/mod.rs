mod confirm;
mod input;
mod key_result;
mod product_form;

pub use confirm::ConfirmDialog;
pub use key_result::KeyResult;
pub use product_form::ProductForm;
