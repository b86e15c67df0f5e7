pub mod payload;
pub mod track;
pub mod track_list;
