pub mod genre;
pub mod producer;
pub mod track;
pub mod track_producer;
