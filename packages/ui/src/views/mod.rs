mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod dashboard;
pub use dashboard::DashboardView;

mod login;
pub use login::LoginView;

mod profile;
pub use profile::ProfileView;

mod professors;
pub use professors::ProfessorsView;

mod schedule;
pub use schedule::ScheduleView;
