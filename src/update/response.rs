use super::UpdateError;

/// Duck DNS answers `OK` or `KO`. Verbose answers carry extra lines after
/// the first, which are not inspected.
pub fn validate(text: &str) -> Result<(), UpdateError> {
    let trimmed = text.trim();

    if trimmed == "OK" || trimmed.starts_with("OK\n") {
        Ok(())
    } else {
        Err(UpdateError::Protocol(text.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_is_accepted() {
        for text in ["OK", "OK\n", "  OK\n", "OK\n203.0.113.1\n\nUPDATED", "OK\nNOCHANGE"] {
            assert!(validate(text).is_ok(), "{text:?}");
        }
    }

    #[test]
    fn anything_else_is_rejected_verbatim() {
        for text in ["", "KO", "KO\n", "OK evil", "OKAY", "NOCHANGE", "ok", "<html>502</html>"] {
            match validate(text) {
                Err(UpdateError::Protocol(got)) => assert_eq!(&*got, text),
                other => panic!("{text:?} gave {other:?}"),
            }
        }
    }
}
