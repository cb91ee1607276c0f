mod appointment;
mod ids;
mod playable_item;

pub use appointment::{
    parse_appointment_time, Appointment, AppointmentStatus, NewAppointment, SERVICE_OFFERINGS,
};
pub use ids::{AppointmentId, ItemId, Locator};
pub use playable_item::PlayableItem;
