pub type Result<T> = std::result::Result<T, crate::error::Error>;

#[macro_export]
macro_rules! verify_arg {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_arg(result, stringify!($name), stringify!($expr))?;
    }};
}

#[macro_export]
macro_rules! verify_data {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_data(result, stringify!($name), stringify!($expr))?;
    }};
}

#[inline]
pub fn verify_arg(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        invalid_arg(name, condition)
    }
}

#[inline]
pub fn verify_data(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        invalid_format(name, condition)
    }
}

#[cold]
pub fn invalid_arg(name: &str, condition: &str) -> Result<()> {
    Err(crate::error::ErrorKind::InvalidArgument {
        name: name.to_string(),
        message: condition.to_string(),
    }
    .into())
}

#[cold]
pub fn invalid_format(name: &str, condition: &str) -> Result<()> {
    Err(crate::error::ErrorKind::InvalidFormat {
        element: name.to_string(),
        message: condition.to_string(),
    }
    .into())
}

#[cfg(test)]
mod tests {
    fn check_len(len: usize) -> crate::Result<()> {
        crate::verify_data!(len, len % 4 == 0);
        Ok(())
    }

    fn check_count(count: usize) -> crate::Result<()> {
        crate::verify_arg!(count, count > 0);
        Ok(())
    }

    #[test]
    fn test_verify_macros() {
        assert!(check_len(8).is_ok());
        let err = check_len(7).unwrap_err();
        assert!(err.is_invalid_format());
        assert!(err.to_string().contains("len % 4 == 0"));

        assert!(check_count(1).is_ok());
        assert!(check_count(0).unwrap_err().is_invalid_arg());
    }
}
