/*!
Macro helpers for the tokenizer and reader.

The assertion macros check internal invariants in tests or when the `checked` cfg is enabled.
They compile to nothing otherwise, so they're only for things the code already guarantees.
*/

macro_rules! test_assert {
    ($($tokens:tt)*) => {{
        #[cfg(any(test, checked))]
        {
            assert!($($tokens)*);
        }
    }};
}

macro_rules! test_assert_eq {
    ($($tokens:tt)*) => {{
        #[cfg(any(test, checked))]
        {
            assert_eq!($($tokens)*);
        }
    }};
}

/**
Return an "unexpected character" error for the given byte, or end of input.
*/
macro_rules! unexpected {
    ($c:expr) => {
        return Err($crate::error::Error::unexpected($c))
    };
}
