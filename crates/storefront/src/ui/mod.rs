//! Controllers behind the storefront's interactive components.
//!
//! These hold the component state that is not plain rendering: the login
//! modal, its forms, and the account pages.

pub mod account;
pub mod forms;
pub mod login_modal;

pub use account::{AccountAccess, ProfileForm, ProfileMessage};
pub use forms::{FormError, LoginForm, MIN_PASSWORD_LENGTH, RegisterForm};
pub use login_modal::{LOGIN_FAILED, LoginModal, LoginModalState, ModalMode, REGISTER_FAILED};
