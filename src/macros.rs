// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression: literals, consts or vars
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! join {
    // String-type concatenation shorthand!
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from($first);
        $(
            s.push_str($rest);
        )+
        s
    }};
}

/// `writeln!` into a console/progress writer, lifting the io error into `VizError`.
#[macro_export]
macro_rules! say {
    ($out:expr, $($arg:tt)*) => {
        ::std::io::Write::write_fmt(&mut $out, format_args!("{}\n", format_args!($($arg)*)))
            .map_err($crate::error::VizError::from)
    };
}

/// Season label as shown to the user: `2021/2022`.
#[macro_export]
macro_rules! season_label {
    ($season:expr) => {
        format!("{}/{}", $season - 1, $season)
    };
}
