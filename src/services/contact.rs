use crate::models::{Car, ContactRequest};

/// WhatsApp click-to-chat link with a pre-filled message
///
/// The phone number is reduced to its digits (international format
/// without `+`).
pub fn whatsapp_link(phone_number: &str, message: &str) -> String {
    let digits: String = phone_number.chars().filter(char::is_ascii_digit).collect();
    format!("https://wa.me/{}?text={}", digits, urlencoding::encode(message))
}

/// Default enquiry text for a listed car
pub fn enquiry_message(car: &Car) -> String {
    format!(
        "Hi, I'm interested in the {} {} {} listed at AED {}.",
        car.year, car.make, car.model, car.price
    )
}

/// Accept a contact form message
///
/// There is no mailbox behind the form; messages are logged and acknowledged.
pub fn accept_contact(request: &ContactRequest) -> String {
    let message_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(
        "Contact message {} from {} <{}>: {}",
        message_id,
        request.name,
        request.email,
        request.subject
    );
    message_id
}
