pub mod form_types;
pub mod predict_types;
