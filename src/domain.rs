pub mod c_binds;
pub mod descriptor;
pub mod exchange;
