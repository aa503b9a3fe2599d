pub mod io;

pub use io::Console;
