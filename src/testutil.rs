use rust_decimal::Decimal;

use crate::sheet::Ledger;

/// Parses an indented, headerless CSV literal into a `Ledger`.
pub fn ledger_from_csv(s: &str) -> Ledger {
    let text = textwrap::dedent(s);
    crate::sheet::csv::read_ledger(text.trim().as_bytes(), encoding_rs::UTF_8)
        .expect("test input did not parse")
}

pub fn dec(s: &str) -> Decimal {
    s.parse().expect("test decimal did not parse")
}

#[macro_export]
macro_rules! assert_text_eq {
    ($want:expr, $got:expr, $($context_arg:expr),*) => {
        let want_str: &str = $want;
        let got_str: &str = $got;
        if want_str != got_str {
            eprintln!($($context_arg,)*);
            text_diff::assert_diff(want_str, got_str, "\n", 0);
        }
    };
    ($want:expr, $got:expr) => {
        let want_str: &str = $want;
        let got_str: &str = $got;
        if want_str != got_str {
            text_diff::assert_diff(want_str, got_str, "\n", 0);
        }
    };
}
