pub mod inspect;
pub mod series;
pub mod windows;
