pub mod bubble_button;
pub mod widget;

pub use bubble_button::{BubbleButton, ButtonStyles, Phase};
pub use widget::{Color, Event, EventResponse, Point, Rect, Widget};
