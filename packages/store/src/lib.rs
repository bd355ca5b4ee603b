//! # Shelfmark client state
//!
//! Framework-free state and controllers for the library front-end. Everything
//! that talks to the server goes through [`LibraryGateway`]; everything that the
//! user sees as a toast is a [`Notice`].
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Books, profiles, professors, listing pages |
//! | [`result`] | `ActionResult`, `BorrowReceipt`, `GatewayError` |
//! | [`gateway`] | The async remote action interface |
//! | [`favorites`] | Favorites cache with two-phase toggles |
//! | [`borrow`] | Borrow confirmation workflow |
//! | [`profile`] | Profile editor and password form |
//! | [`credits`] | Credit deduction after a meeting is scheduled |
//! | [`query`] | `page` / `genre` / `q` listing parameters |
//! | [`dashboard`] | State container tying the dashboard together |
//! | [`config`] | `shelfmark.toml` |

pub mod borrow;
pub mod config;
pub mod credits;
pub mod dashboard;
pub mod favorites;
pub mod gateway;
pub mod models;
pub mod notice;
pub mod profile;
pub mod query;
pub mod result;

mod memory;
pub use memory::{GatewayCall, MemoryGateway};

pub use borrow::{BorrowSettlement, BorrowState, BorrowWorkflow};
pub use config::{ClientSettings, LibraryConfig};
pub use credits::{widget_url, CreditSettlement, SchedulingCredits};
pub use dashboard::DashboardState;
pub use favorites::{FavoriteAction, FavoriteIntent, FavoritesCache};
pub use gateway::LibraryGateway;
pub use models::{Book, BookId, BookPage, FavoriteBook, MemberId, ProfileUpdate, Professor, SessionMember, UserProfile};
pub use notice::{Notice, NoticeLevel, NoticeTray};
pub use profile::{PasswordChange, PasswordForm, ProfileEditor, ProfileField};
pub use query::ListingQuery;
pub use result::{ActionResult, BorrowReceipt, GatewayError};
