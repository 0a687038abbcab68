use core_proc_macros::ApiResource;

#[derive(ApiResource)]
#[api_resource(url = "/bookings")]
#[allow(dead_code)]
pub struct Booking {
    event_id: String,
    quantity: i32,
}

fn main() {
    assert_eq!(Booking::URL, "/bookings");
    assert_eq!(Booking::COLLECTION, "bookings");
}
