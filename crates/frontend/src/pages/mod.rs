mod appointments;
mod callback;
mod login;
mod profile;
mod register;

pub use appointments::AppointmentsPage;
pub use callback::LoginCallbackPage;
pub use login::LoginPage;
pub use profile::ProfilePage;
pub use register::RegisterPage;
