//! Location-arrow glyph shown at the trailing edge of the button.

/// Side of the square view box [`LOCATION_ARROW`] is authored in
pub const VIEW_BOX: f32 = 1024.0;

pub const LOCATION_ARROW: &str = "M840.028 106.275l-760.474 253.492c-8.756 2.919-15.956 9.258-19.96 17.574-8.178 16.985-1.038 37.384 15.947 45.562l331.45 159.589 159.588 331.448c4.004 8.315 11.203 14.653 19.958 17.577 17.884 5.96 37.217-3.707 43.177-21.591l253.491-760.476c2.335-7.007 2.335-14.581 0-21.588-5.96-17.884-25.293-27.549-43.177-21.587zM769.869 219.611l-298.949 298.953-244.596-117.771 543.545-181.182z";
