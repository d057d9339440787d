//! Cross-cutting error handling tests for the provider abstraction

use crate::ai::provider::AiError;
use proptest::prelude::*;

#[test]
fn test_ai_error_display() {
    let err = AiError::NotConfigured {
        provider: "Groq".to_string(),
        message: "test message".to_string(),
    };
    assert_eq!(format!("{}", err), "[Groq] AI not configured: test message");

    let err = AiError::Network {
        provider: "Groq".to_string(),
        message: "connection failed".to_string(),
    };
    assert_eq!(format!("{}", err), "[Groq] Network error: connection failed");

    let err = AiError::Api {
        provider: "Relay".to_string(),
        code: 500,
        message: "Internal Server Error".to_string(),
    };
    assert_eq!(
        format!("{}", err),
        "[Relay] API error (500): Internal Server Error"
    );

    let err = AiError::Parse {
        provider: "Groq".to_string(),
        message: "invalid json".to_string(),
    };
    assert_eq!(format!("{}", err), "[Groq] Parse error: invalid json");

    let err = AiError::Cancelled;
    assert_eq!(format!("{}", err), "Request cancelled");
}

// Every variant except Cancelled names the provider in brackets first
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_error_display_includes_provider_in_brackets(
        provider in "[A-Za-z][A-Za-z0-9_-]{2,20}",
        message in "[a-zA-Z0-9 .,!?_-]{1,100}",
        code in 100u16..600u16,
    ) {
        let errors = vec![
            AiError::NotConfigured { provider: provider.clone(), message: message.clone() },
            AiError::Network { provider: provider.clone(), message: message.clone() },
            AiError::Api { provider: provider.clone(), code, message: message.clone() },
            AiError::Parse { provider: provider.clone(), message: message.clone() },
        ];

        for err in errors {
            let display = format!("{}", err);
            prop_assert!(
                display.starts_with(&format!("[{}]", provider)),
                "display should start with [{}], got: {}",
                provider,
                display
            );
            prop_assert!(display.contains(&message));
        }
    }

    #[test]
    fn prop_api_error_display_includes_status_code(
        code in 100u16..600u16,
    ) {
        let err = AiError::Api {
            provider: "Groq".to_string(),
            code,
            message: "x".to_string(),
        };
        let expected = format!("({})", code);
        let display = format!("{}", err);
        prop_assert!(display.contains(&expected));
    }
}
