pub mod cmhc;
