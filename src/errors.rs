// Create the Error, ErrorKind, ResultExt, and Result types
// Result is a typedef of std `Result` with the error type our own `Error`
// Defines the From conversions that let ? work for our `Error`.
// ResultExt adds the `chain_err` trait method.
#![allow(deprecated)]

use error_chain::*;

error_chain! {

    foreign_links {
        DocOptFailure(::docopt::Error);
        Io(::std::io::Error);
        Json(::serde_json::Error);
    }

    errors {
        InvalidDimensions(rows: usize, columns: usize) {
            description("invalid grid dimensions")
            display("invalid grid dimensions {}x{}: rows and columns must be at least 1", rows, columns)
        }
        InvalidPlayArea(width: f32, height: f32) {
            description("invalid play area")
            display("invalid play area {}x{}: width and height must be positive pixel sizes",
                    width, height)
        }
    }
}
