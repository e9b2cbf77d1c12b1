use std::time::Duration;

use abai_extern_contracts::mailjet::{MailjetApiService, MailjetContact, MailjetMessage};
use abai_extern_impl::mailjet::{MailjetApiServiceConfig, MailjetApiServiceImpl};
use abai_testing::mailjet::{Contact, Message, MESSAGES_ROUTE};
use pretty_assertions::assert_eq;
use url::Url;

const API_KEY: &str = "test-api-key";
const API_SECRET: &str = "test-api-secret";

#[tokio::test]
async fn send_ok() {
    let (sut, api_url) = make_sut(API_KEY, API_SECRET).await;

    let result = sut.send(message("info@ab-ai.ca")).await.unwrap();

    assert!(result);
    assert_eq!(
        received_messages(&api_url).await,
        [Message {
            from: Contact {
                email: "noreply@ab-ai.ca".into(),
                name: Some("Contact Form".into()),
            },
            to: vec![Contact {
                email: "info@ab-ai.ca".into(),
                name: Some("Alberta AI".into()),
            }],
            reply_to: Some(Contact {
                email: "john@example.com".into(),
                name: Some("John Doe".into()),
            }),
            subject: "New contact from John Doe".into(),
            text_part: "Hello there".into(),
            html_part: Some("<p>Hello there</p>".into()),
        }]
    );
}

#[tokio::test]
async fn send_without_optional_parts() {
    let (sut, api_url) = make_sut(API_KEY, API_SECRET).await;
    let message = MailjetMessage {
        reply_to: None,
        html_part: None,
        ..message("info@ab-ai.ca")
    };

    let result = sut.send(message).await.unwrap();

    assert!(result);
    let received = received_messages(&api_url).await;
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].reply_to, None);
    assert_eq!(received[0].html_part, None);
}

#[tokio::test]
async fn send_rejected() {
    let (sut, _) = make_sut(API_KEY, API_SECRET).await;

    let result = sut.send(message("info@rejected.example")).await.unwrap();

    assert!(!result);
}

#[tokio::test]
async fn send_invalid_credentials() {
    let (sut, api_url) = make_sut(API_KEY, "wrong-secret").await;

    let result = sut.send(message("info@ab-ai.ca")).await;

    assert!(result.is_err());
    assert!(received_messages(&api_url).await.is_empty());
}

#[tokio::test]
async fn ping_ok() {
    let (sut, _) = make_sut(API_KEY, API_SECRET).await;
    sut.ping().await.unwrap();
}

#[tokio::test]
async fn ping_invalid_credentials() {
    let (sut, _) = make_sut("wrong-key", API_SECRET).await;
    assert!(sut.ping().await.is_err());
}

async fn make_sut(api_key: &str, api_secret: &str) -> (MailjetApiServiceImpl, Url) {
    let router = abai_testing::mailjet::router(API_KEY.into(), API_SECRET.into());
    let addr = abai_testing::spawn(router).await.unwrap();
    let api_url = Url::parse(&format!("http://{addr}/")).unwrap();

    let config = MailjetApiServiceConfig::new(
        api_key,
        api_secret,
        Duration::from_secs(5),
        Some(api_url.clone()),
    );

    (MailjetApiServiceImpl::new(config), api_url)
}

async fn received_messages(api_url: &Url) -> Vec<Message> {
    reqwest::get(api_url.join(MESSAGES_ROUTE).unwrap())
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

fn message(to: &str) -> MailjetMessage {
    MailjetMessage {
        from: MailjetContact {
            email: "noreply@ab-ai.ca".into(),
            name: Some("Contact Form".into()),
        },
        to: vec![MailjetContact {
            email: to.into(),
            name: Some("Alberta AI".into()),
        }],
        reply_to: Some(MailjetContact {
            email: "john@example.com".into(),
            name: Some("John Doe".into()),
        }),
        subject: "New contact from John Doe".into(),
        text_part: "Hello there".into(),
        html_part: Some("<p>Hello there</p>".into()),
    }
}
