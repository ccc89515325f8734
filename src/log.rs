#[macro_export]
macro_rules! debug {
    ($context:expr, $console:expr, $template:literal $(, $value:expr)* $(,)?) => {
        if $context.options().debug {
            $crate::log!($console, $template $(, $value)*);
        }
    };
}

#[macro_export]
macro_rules! log {
    ($console:expr, $template:literal $(, $value:expr)* $(,)?) => {
        $console
            .write_stderr(format!(concat!("turtle-gen: ", $template, "\n") $(, $value)*).as_bytes())
            .await?;
    };
}
