//! Account handlers.

mod get_account;
mod update_display_name;

pub use get_account::{GetAccountHandler, GetAccountQuery};
pub use update_display_name::{
    UpdateDisplayNameCommand, UpdateDisplayNameHandler, UpdateDisplayNameResult,
};
