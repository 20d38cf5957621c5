use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Thumbnail {
    pub path: String,
    pub extension: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Price {
    #[serde(default)]
    pub price: Option<f64>,
}

/// A comic record as returned by the catalog endpoints. Immutable once fetched;
/// favorite membership lives in the synchronizer's registry, not on the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comic {
    pub id: i64,
    pub title: String,
    #[serde(rename = "pageCount", default)]
    pub page_count: Option<i64>,
    #[serde(default)]
    pub prices: Vec<Price>,
    pub thumbnail: Thumbnail,
    #[serde(default)]
    pub description: Option<String>,
}

impl Comic {
    pub fn thumbnail_url(&self) -> String {
        format!(
            "{}/portrait_uncanny.{}",
            self.thumbnail.path, self.thumbnail.extension
        )
    }

    pub fn price(&self) -> Option<f64> {
        self.prices.first().and_then(|p| p.price)
    }

    /// Denormalized metadata sent along with an add request so the favorites
    /// surface can render a card without a second fetch.
    pub fn favorite_payload(&self) -> FavoritePayload {
        FavoritePayload {
            title: self.title.clone(),
            page_count: self.page_count,
            price: self.price(),
            thumbnail_path: self.thumbnail.path.clone(),
            thumbnail_extension: self.thumbnail.extension.clone(),
            description: self.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComicsPage {
    pub comics: Vec<Comic>,
    pub favorite_ids: Vec<i64>,
}

/// Gallery entries carry a pre-built thumbnail URL, unlike catalog records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryComic {
    pub id: i64,
    pub title: String,
    pub thumbnail: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FavoritePayload {
    pub title: String,
    #[serde(rename = "pageCount")]
    pub page_count: Option<i64>,
    pub price: Option<f64>,
    pub thumbnail_path: String,
    pub thumbnail_extension: String,
    pub description: Option<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_comics_page() {
        let body = r#"{
            "comics": [
                {
                    "id": 123,
                    "title": "Spider-Man (2022) #1",
                    "pageCount": 32,
                    "prices": [{"price": 3.99}],
                    "thumbnail": {"path": "http://i.example.com/a1b2", "extension": "jpg"},
                    "description": "Webs."
                },
                {
                    "id": 456,
                    "title": "Hulk Annual",
                    "prices": [],
                    "thumbnail": {"path": "http://i.example.com/c3d4", "extension": "png"}
                }
            ],
            "favorite_ids": [123]
        }"#;

        let page: ComicsPage = serde_json::from_str(body).unwrap();

        assert_eq!(page.comics.len(), 2);
        assert_eq!(page.favorite_ids, vec![123]);
        assert_eq!(page.comics[0].page_count, Some(32));
        assert_eq!(page.comics[0].price(), Some(3.99));
        assert_eq!(page.comics[1].page_count, None);
        assert_eq!(page.comics[1].price(), None);
        assert!(page.comics[1].description.is_none());
    }

    #[test]
    fn test_title_with_quotes_survives_parsing() {
        let body = r#"{
            "id": 7,
            "title": "O'Brien's \"Secret\"",
            "thumbnail": {"path": "http://i.example.com/x", "extension": "jpg"},
            "description": "It's a \"classic\""
        }"#;

        let comic: Comic = serde_json::from_str(body).unwrap();

        assert_eq!(comic.title, r#"O'Brien's "Secret""#);
        assert_eq!(comic.description.as_deref(), Some(r#"It's a "classic""#));

        let payload = comic.favorite_payload();
        assert_eq!(payload.title, r#"O'Brien's "Secret""#);
        assert_eq!(payload.description.as_deref(), Some(r#"It's a "classic""#));
    }

    #[test]
    fn test_thumbnail_url() {
        let comic = Comic {
            id: 1,
            title: "X-Men".to_string(),
            page_count: None,
            prices: vec![],
            thumbnail: Thumbnail {
                path: "http://i.example.com/e5f6".to_string(),
                extension: "jpg".to_string(),
            },
            description: None,
        };

        assert_eq!(
            comic.thumbnail_url(),
            "http://i.example.com/e5f6/portrait_uncanny.jpg"
        );
    }

    #[test]
    fn test_favorite_payload_wire_format() {
        let comic = Comic {
            id: 9,
            title: "Thor".to_string(),
            page_count: Some(48),
            prices: vec![Price { price: Some(4.99) }],
            thumbnail: Thumbnail {
                path: "http://i.example.com/t".to_string(),
                extension: "png".to_string(),
            },
            description: Some("Hammer time".to_string()),
        };

        let body = serde_json::to_value(comic.favorite_payload()).unwrap();

        assert_eq!(body["pageCount"], 48);
        assert_eq!(body["price"], 4.99);
        assert_eq!(body["thumbnail_path"], "http://i.example.com/t");
        assert_eq!(body["thumbnail_extension"], "png");
    }

    #[test]
    fn test_parse_gallery_comics() {
        let body = r#"[
            {"id": 1, "title": "Avengers", "thumbnail": "http://i.example.com/av/portrait_uncanny.jpg"}
        ]"#;

        let comics: Vec<GalleryComic> = serde_json::from_str(body).unwrap();

        assert_eq!(comics.len(), 1);
        assert_eq!(
            comics[0].thumbnail,
            "http://i.example.com/av/portrait_uncanny.jpg"
        );
    }
}
