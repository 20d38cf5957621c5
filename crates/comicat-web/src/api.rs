use std::error::Error;

use anyhow::anyhow;
use web_sys::{DomParser, SupportedType};

use crate::common::{Comic, ComicsPage, FavoritePayload, GalleryComic};
use crate::utils::api_host;

/// Outcome of an auth form submission. The server answers both success and
/// rejection with an HTML page; rejection is signaled by an error marker node
/// in the markup rather than by status code.
pub enum AuthOutcome {
    Success { redirect: String },
    Rejected { message: String },
}

pub async fn get_random_comics() -> Result<Vec<GalleryComic>, Box<dyn Error>> {
    let res = reqwest::Client::new()
        .get(format!("{}/get_random_comics", api_host()))
        .send()
        .await?;
    let comics = res.json().await?;

    Ok(comics)
}

pub async fn load_more_comics(offset: i64) -> Result<ComicsPage, Box<dyn Error>> {
    let res = reqwest::Client::new()
        .get(format!("{}/load_more_comics/{}", api_host(), offset))
        .send()
        .await?;
    let page = res.json().await?;

    Ok(page)
}

pub async fn add_favorite(comic: &Comic) -> Result<(), Box<dyn Error>> {
    let payload: FavoritePayload = comic.favorite_payload();
    let res = reqwest::Client::new()
        .post(format!("{}/add_favorite/{}", api_host(), comic.id))
        .json(&payload)
        .send()
        .await?;

    if !res.status().is_success() {
        return Err(format!("add favorite returned {}", res.status()).into());
    }

    Ok(())
}

pub async fn remove_favorite(comic_id: i64) -> Result<(), Box<dyn Error>> {
    let res = reqwest::Client::new()
        .post(format!("{}/remove_favorite/{}", api_host(), comic_id))
        .send()
        .await?;

    if !res.status().is_success() {
        return Err(format!("remove favorite returned {}", res.status()).into());
    }

    Ok(())
}

pub async fn login(email: &str, password: &str) -> Result<AuthOutcome, Box<dyn Error>> {
    submit_auth_form("/login", &[("email", email), ("password", password)]).await
}

pub async fn register(
    username: &str,
    email: &str,
    identification: &str,
    password: &str,
    confirm_password: &str,
) -> Result<AuthOutcome, Box<dyn Error>> {
    submit_auth_form(
        "/register",
        &[
            ("username", username),
            ("email", email),
            ("identification", identification),
            ("password", password),
            ("confirm_password", confirm_password),
        ],
    )
    .await
}

async fn submit_auth_form(
    path: &str,
    fields: &[(&str, &str)],
) -> Result<AuthOutcome, Box<dyn Error>> {
    let res = reqwest::Client::new()
        .post(format!("{}{}", api_host(), path))
        .header("Accept", "text/html")
        .form(fields)
        .send()
        .await?;

    let redirect = res.url().to_string();
    let html = res.text().await?;

    parse_auth_response(redirect, &html)
}

fn parse_auth_response(redirect: String, html: &str) -> Result<AuthOutcome, Box<dyn Error>> {
    let document = DomParser::new()
        .map_err(|e| anyhow!("error creating parser: {:?}", e))?
        .parse_from_string(html, SupportedType::TextHtml)
        .map_err(|e| anyhow!("error parsing auth response: {:?}", e))?;

    let marker = document
        .query_selector(".error-message, .alert.alert-error")
        .map_err(|e| anyhow!("error querying auth response: {:?}", e))?;

    match marker {
        Some(node) => Ok(AuthOutcome::Rejected {
            message: node
                .text_content()
                .map(|text| text.trim().to_string())
                .unwrap_or_else(|| "Invalid credentials".to_string()),
        }),
        None => Ok(AuthOutcome::Success { redirect }),
    }
}
