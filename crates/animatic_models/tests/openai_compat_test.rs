use animatic_core::{GenerateRequest, Message};
use animatic_interface::AnimaticDriver;
use animatic_models::{ModelFactory, ModelProvider, ProviderSettings};
use std::env;

#[tokio::test]
async fn test_unreachable_endpoint_is_invocation_failure() -> Result<(), Box<dyn std::error::Error>> {
    let settings = ProviderSettings::new(ModelProvider::OpenRouter)
        .with_base_url("http://127.0.0.1:9/v1/chat/completions")
        .with_max_retries(0)
        .with_timeout_secs(5);
    let factory = ModelFactory::with_api_key(settings, "unused")?;
    let driver = factory.create("gemini-2.5-flash");

    let request = GenerateRequest::builder()
        .messages(vec![Message::user("hello")])
        .build()?;

    let err = driver.generate(&request).await.unwrap_err();
    assert!(err.is_invocation_failure());
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_openrouter_ping() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    let model = env::var("ANIMATIC_TEST_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string());

    let factory = ModelFactory::new(ProviderSettings::new(ModelProvider::OpenRouter))?;
    let driver = factory.create(&model);

    let request = GenerateRequest::builder()
        .messages(vec![Message::user("你好你是谁？")])
        .build()?;

    let response = driver.generate(&request).await?;
    assert!(!response.text().trim().is_empty());
    println!("{}: {}", driver.model_name(), response.text());
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_google_ping() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let factory = ModelFactory::new(ProviderSettings::new(ModelProvider::Google))?;
    let driver = factory.create("gemini-2.5-flash");

    let request = GenerateRequest::builder()
        .messages(vec![
            Message::system("Reply in one short sentence."),
            Message::user("你好你是谁？"),
        ])
        .build()?;

    let response = driver.generate(&request).await?;
    assert!(!response.text().trim().is_empty());
    Ok(())
}
