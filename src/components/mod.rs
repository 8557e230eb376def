//! Dashboard UI: the session gate, the account grid and its cards.

mod account_card;
mod add_account;
mod app;
mod controls;
mod dashboard;
mod icons;
mod login;
mod now_playing;

pub use account_card::*;
pub use add_account::*;
pub use app::*;
pub use controls::*;
pub use dashboard::*;
pub use icons::*;
pub use login::*;
pub use now_playing::*;
