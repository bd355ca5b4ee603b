mod layout;
pub use layout::AppLayout;

mod login;
pub use login::Login;

mod dashboard;
pub use dashboard::Dashboard;

mod professors;
pub use professors::{Professors, Schedule};

mod profile;
pub use profile::Profile;
