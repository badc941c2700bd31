//! Book model, a subset of the ONIX bibliographic vocabulary.
//!
//! See <https://www.editeur.org/83/overview/> for the full standard. Only the
//! author and the main title are mandatory; `currencyCode`, `territory` and
//! `language` fall back to German-market defaults when a record is created
//! without them.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};

pub const DEFAULT_CURRENCY_CODE: &str = "EUR";
pub const DEFAULT_TERRITORY: &str = "Germany";
pub const DEFAULT_LANGUAGE: &str = "German";

/// Persisted book record
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// System-generated key, never changes after creation
    pub id: Uuid,
    /// External identifier (ISBN etc.)
    pub identifier: Option<String>,
    pub author_name: String,
    /// Main title
    pub title_text: String,
    pub subtitle: Option<String>,
    pub part_number: Option<String>,
    pub publisher_name: Option<String>,
    pub city_of_publication: Option<String>,
    /// Year of publication
    pub publishing_date: Option<i32>,
    pub edition_number: Option<i32>,
    pub price_amount: Option<Decimal>,
    pub currency_code: String,
    pub territory: String,
    pub language: String,
    pub pages: Option<i32>,
}

impl Book {
    /// Build a record from validated creation data.
    pub fn from_new(id: Uuid, data: NewBook) -> Self {
        let data = data.with_defaults();
        Self {
            id,
            identifier: data.identifier,
            author_name: data.author_name.unwrap_or_default(),
            title_text: data.title_text.unwrap_or_default(),
            subtitle: data.subtitle,
            part_number: data.part_number,
            publisher_name: data.publisher_name,
            city_of_publication: data.city_of_publication,
            publishing_date: data.publishing_date,
            edition_number: data.edition_number,
            price_amount: data.price_amount,
            currency_code: data.currency_code.unwrap_or_default(),
            territory: data.territory.unwrap_or_default(),
            language: data.language.unwrap_or_default(),
            pages: data.pages,
        }
    }
}

/// Create book form
///
/// Empty form fields count as omitted.
#[serde_as]
#[derive(Debug, Default, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(
        required(message = "authorName is required"),
        length(min = 1, message = "authorName is required")
    )]
    pub author_name: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(
        required(message = "titleText is required"),
        length(min = 1, message = "titleText is required")
    )]
    pub title_text: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub part_number: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub publisher_name: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub city_of_publication: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub publishing_date: Option<i32>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub edition_number: Option<i32>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub price_amount: Option<Decimal>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub territory: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub language: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub pages: Option<i32>,
}

impl NewBook {
    /// Fill in the market defaults the caller left out
    pub fn with_defaults(mut self) -> Self {
        self.currency_code = self
            .currency_code
            .or_else(|| Some(DEFAULT_CURRENCY_CODE.to_string()));
        self.territory = self.territory.or_else(|| Some(DEFAULT_TERRITORY.to_string()));
        self.language = self.language.or_else(|| Some(DEFAULT_LANGUAGE.to_string()));
        self
    }

    /// Round the price to the stored precision
    pub fn with_rounded_price(mut self) -> Self {
        self.price_amount = self.price_amount.map(round_price);
        self
    }
}

/// Update book form
///
/// Only the fields present in the submission are replaced. Text fields are
/// taken verbatim, so an empty `titleText` blanks the title: required fields
/// are checked at creation only. A numeric field submitted empty is cleared;
/// `Some(None)` stands for that.
#[serde_as]
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBook {
    pub identifier: Option<String>,
    pub author_name: Option<String>,
    pub title_text: Option<String>,
    pub subtitle: Option<String>,
    pub part_number: Option<String>,
    pub publisher_name: Option<String>,
    pub city_of_publication: Option<String>,
    #[serde_as(as = "Option<NoneAsEmptyString>")]
    pub publishing_date: Option<Option<i32>>,
    #[serde_as(as = "Option<NoneAsEmptyString>")]
    pub edition_number: Option<Option<i32>>,
    #[serde_as(as = "Option<NoneAsEmptyString>")]
    pub price_amount: Option<Option<Decimal>>,
    pub currency_code: Option<String>,
    pub territory: Option<String>,
    pub language: Option<String>,
    #[serde_as(as = "Option<NoneAsEmptyString>")]
    pub pages: Option<Option<i32>>,
}

impl UpdateBook {
    /// Round the price to the stored precision
    pub fn with_rounded_price(mut self) -> Self {
        if let Some(Some(price)) = self.price_amount {
            self.price_amount = Some(Some(round_price(price)));
        }
        self
    }

    /// Overwrite the fields of `book` named by this update
    pub fn apply(&self, book: &mut Book) {
        macro_rules! replace {
            ($field:ident) => {
                if self.$field.is_some() {
                    book.$field = self.$field.clone();
                }
            };
            ($field:ident, direct) => {
                if let Some(val) = &self.$field {
                    book.$field = val.clone();
                }
            };
        }

        replace!(identifier);
        replace!(author_name, direct);
        replace!(title_text, direct);
        replace!(subtitle);
        replace!(part_number);
        replace!(publisher_name);
        replace!(city_of_publication);
        replace!(publishing_date, direct);
        replace!(edition_number, direct);
        replace!(price_amount, direct);
        replace!(currency_code, direct);
        replace!(territory, direct);
        replace!(language, direct);
        replace!(pages, direct);
    }
}

/// Decimal places kept for `priceAmount` (`NUMERIC(12, 2)`)
pub const PRICE_SCALE: u32 = 2;

/// Round a price the way the database column does
pub fn round_price(price: Decimal) -> Decimal {
    price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Parse a book key taken from a request path
pub fn parse_book_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidId(format!("'{}' is not a valid book id", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn kafka() -> NewBook {
        NewBook {
            author_name: Some("Kafka".to_string()),
            title_text: Some("The Trial".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_fill_missing_market_fields() {
        let book = kafka().with_defaults();
        assert_eq!(book.currency_code.as_deref(), Some("EUR"));
        assert_eq!(book.territory.as_deref(), Some("Germany"));
        assert_eq!(book.language.as_deref(), Some("German"));
    }

    #[test]
    fn test_defaults_keep_supplied_values() {
        let book = NewBook {
            currency_code: Some("CHF".to_string()),
            territory: Some("Switzerland".to_string()),
            ..kafka()
        }
        .with_defaults();
        assert_eq!(book.currency_code.as_deref(), Some("CHF"));
        assert_eq!(book.territory.as_deref(), Some("Switzerland"));
        assert_eq!(book.language.as_deref(), Some("German"));
    }

    #[test]
    fn test_validation_requires_author_and_title() {
        assert!(kafka().validate().is_ok());

        let missing_author = NewBook { author_name: None, ..kafka() };
        let err = AppError::from(missing_author.validate().unwrap_err());
        assert!(matches!(err, AppError::Validation(ref msg) if msg == "authorName is required"));

        let empty_title = NewBook { title_text: Some(String::new()), ..kafka() };
        let err = AppError::from(empty_title.validate().unwrap_err());
        assert!(matches!(err, AppError::Validation(ref msg) if msg == "titleText is required"));
    }

    #[test]
    fn test_validation_reports_both_missing_fields() {
        let err = AppError::from(NewBook::default().validate().unwrap_err());
        match err {
            AppError::Validation(msg) => {
                assert_eq!(msg, "authorName is required; titleText is required");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_new_book_treats_empty_fields_as_omitted() {
        let data: NewBook = serde_json::from_value(json!({
            "authorName": "Kafka",
            "titleText": "The Trial",
            "subtitle": "",
            "pages": "",
            "editionNumber": "2",
            "priceAmount": "12.50",
            "currencyCode": "",
            "unknownField": "ignored"
        }))
        .unwrap();

        assert_eq!(data.subtitle, None);
        assert_eq!(data.pages, None);
        assert_eq!(data.edition_number, Some(2));
        assert_eq!(data.price_amount, Some(Decimal::new(1250, 2)));
        assert_eq!(data.with_defaults().currency_code.as_deref(), Some("EUR"));
    }

    #[test]
    fn test_empty_author_fails_validation_after_decoding() {
        let data: NewBook = serde_json::from_value(json!({
            "authorName": "",
            "titleText": "The Trial"
        }))
        .unwrap();
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_from_new_assigns_id_and_defaults() {
        let id = Uuid::new_v4();
        let book = Book::from_new(id, kafka());
        assert_eq!(book.id, id);
        assert_eq!(book.author_name, "Kafka");
        assert_eq!(book.title_text, "The Trial");
        assert_eq!(book.currency_code, "EUR");
        assert_eq!(book.pages, None);
    }

    #[test]
    fn test_update_replaces_only_named_fields() {
        let mut book = Book::from_new(Uuid::new_v4(), NewBook { pages: Some(250), ..kafka() });
        let update = UpdateBook {
            title_text: Some("New Title".to_string()),
            ..Default::default()
        };
        update.apply(&mut book);

        assert_eq!(book.title_text, "New Title");
        assert_eq!(book.author_name, "Kafka");
        assert_eq!(book.pages, Some(250));
        assert_eq!(book.currency_code, "EUR");
    }

    #[test]
    fn test_update_form_distinguishes_absent_and_empty_numbers() {
        let update: UpdateBook = serde_json::from_value(json!({
            "subtitle": "",
            "pages": "",
            "editionNumber": "4"
        }))
        .unwrap();
        assert_eq!(update.subtitle.as_deref(), Some(""));
        assert_eq!(update.pages, Some(None));
        assert_eq!(update.edition_number, Some(Some(4)));
        assert_eq!(update.publishing_date, None);
        assert_eq!(update.price_amount, None);
    }

    #[test]
    fn test_update_clears_emptied_numbers() {
        let mut book = Book::from_new(
            Uuid::new_v4(),
            NewBook {
                pages: Some(255),
                edition_number: Some(2),
                price_amount: Some(Decimal::new(1250, 2)),
                ..kafka()
            },
        );
        let update = UpdateBook {
            pages: Some(None),
            price_amount: Some(None),
            ..Default::default()
        };
        update.apply(&mut book);

        assert_eq!(book.pages, None);
        assert_eq!(book.price_amount, None);
        assert_eq!(book.edition_number, Some(2));
    }

    #[test]
    fn test_price_is_rounded_half_away_from_zero() {
        assert_eq!(round_price(Decimal::new(12345, 3)), Decimal::new(1235, 2));
        assert_eq!(round_price(Decimal::new(12344, 3)), Decimal::new(1234, 2));

        let data = NewBook { price_amount: Some(Decimal::new(9995, 3)), ..kafka() }.with_rounded_price();
        assert_eq!(data.price_amount, Some(Decimal::new(1000, 2)));

        let update = UpdateBook {
            price_amount: Some(Some(Decimal::new(1005, 3))),
            ..Default::default()
        }
        .with_rounded_price();
        assert_eq!(update.price_amount, Some(Some(Decimal::new(101, 2))));
    }

    #[test]
    fn test_parse_book_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_book_id(&id.to_string()).unwrap(), id);
        assert!(matches!(parse_book_id("not-an-id"), Err(AppError::InvalidId(_))));
    }

    #[test]
    fn test_book_serializes_with_form_field_names() {
        let book = Book::from_new(Uuid::new_v4(), kafka());
        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(value["titleText"], "The Trial");
        assert_eq!(value["authorName"], "Kafka");
        assert_eq!(value["currencyCode"], "EUR");
    }
}
