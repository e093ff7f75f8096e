//! PostgreSQL array functions used for set-style relationship updates.

use diesel::sql_types::{Array, Uuid};

diesel::define_sql_function! {
    /// `array_append` over UUID arrays.
    fn array_append(array: Array<Uuid>, element: Uuid) -> Array<Uuid>;
}

diesel::define_sql_function! {
    /// `array_remove` over UUID arrays; removes every occurrence.
    fn array_remove(array: Array<Uuid>, element: Uuid) -> Array<Uuid>;
}
