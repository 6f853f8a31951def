pub mod transparency;
