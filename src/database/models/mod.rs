pub mod appointment;
pub mod client;
pub mod organization;
pub mod therapy_session;

pub use appointment::Appointment;
pub use client::Client;
pub use organization::{Organization, OrganizationInvitation, OrganizationMember};
pub use therapy_session::{SessionNote, TherapySession};
