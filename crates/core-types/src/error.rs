use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CoreError {
    #[error("Invalid stock code '{0}': expected a number between 000001 and 999998")]
    InvalidStockCode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_stock_code_names_the_input() {
        let err = "1234567".parse::<crate::StockCode>().unwrap_err();

        assert_eq!(err, CoreError::InvalidStockCode("1234567".to_string()));
        assert!(err.to_string().contains("'1234567'"));
    }
}
