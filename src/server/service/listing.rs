//! Book listing service layer.
//!
//! Listing CRUD restricted to the owner, filtering and ordering, the listing status state
//! machine, and ratings of completed listings by owner.

use std::{cmp::Ordering, collections::HashMap};

use entity::sea_orm_active_enums::ListingStatus;
use rust_decimal::{prelude::ToPrimitive, Decimal};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Order};

use crate::{
    model::listing::{
        BookListingDto, BookListingRequestDto, CompletedListingDto, ListingQuery, ListingStatusDto,
    },
    server::{
        data::{
            listing::{
                completed_listing::CompletedListingRepository, ListingFields, ListingRepository,
                ListingSort,
            },
            user::UserRepository,
        },
        error::{listing::ListingError, Error},
        model::db::BookListingModel,
        service::user::user_dtos,
    },
};

const MAX_TITLE_LENGTH: usize = 50;
const MAX_TEXT_LENGTH: usize = 255;
/// 9999.99 in cents, prices have at most 6 digits with 2 decimal places
const MAX_PRICE_CENTS: i64 = 999_999;

/// Ordering requested through the `ordering` query parameter
#[derive(Clone, Debug, PartialEq)]
pub enum ListingOrdering {
    /// Ordered by a listing column in the database
    Column(ListingSort, Order),
    /// Ordered by the owner's average seller rating, unrated owners last
    OwnerRating { descending: bool },
}

impl ListingOrdering {
    pub fn parse(ordering: &str) -> Result<Self, ListingError> {
        let (descending, field) = match ordering.strip_prefix('-') {
            Some(field) => (true, field),
            None => (false, ordering),
        };
        let order = if descending { Order::Desc } else { Order::Asc };

        match field {
            "price" => Ok(Self::Column(ListingSort::Price, order)),
            "name" => Ok(Self::Column(ListingSort::Name, order)),
            "rating" => Ok(Self::OwnerRating { descending }),
            _ => Err(ListingError::InvalidOrdering(ordering.to_string())),
        }
    }
}

pub struct ListingService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ListingService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a listing owned by `owner_id`, active unless another status is requested
    pub async fn create_listing(
        &self,
        owner_id: i32,
        listing: BookListingRequestDto,
    ) -> Result<BookListingDto, Error> {
        let status = listing
            .status
            .map(ListingStatus::from)
            .unwrap_or(ListingStatus::Active);
        let fields = validate_listing(listing, status)?;

        let listing = ListingRepository::new(self.db).create(owner_id, fields).await?;

        tracing::debug!(listing_id = %listing.id, owner_id = %owner_id, "Created book listing");

        self.single_dto(listing).await
    }

    pub async fn get_listing(&self, listing_id: i32) -> Result<BookListingDto, Error> {
        let listing = ListingRepository::new(self.db)
            .get(listing_id)
            .await?
            .ok_or(ListingError::NotFound(listing_id))?;

        self.single_dto(listing).await
    }

    /// List listings matching `query`
    ///
    /// `name` and `author` match case-insensitive substrings, `edition` and `owner` match
    /// exactly. Without an ordering, listings are returned by ID.
    pub async fn get_listings(&self, query: ListingQuery) -> Result<Vec<BookListingDto>, Error> {
        let ordering = query
            .ordering
            .as_deref()
            .filter(|ordering| !ordering.is_empty())
            .map(ListingOrdering::parse)
            .transpose()?;
        let sort = match &ordering {
            Some(ListingOrdering::Column(column, order)) => Some((*column, order.clone())),
            _ => None,
        };

        let name = query.name.map(|name| name.to_lowercase());
        let author = query.author.map(|author| author.to_lowercase());

        let listings: Vec<BookListingModel> = ListingRepository::new(self.db)
            .find(query.owner, query.edition, sort)
            .await?
            .into_iter()
            .filter(|listing| {
                name.as_ref()
                    .is_none_or(|name| listing.name.to_lowercase().contains(name))
                    && author
                        .as_ref()
                        .is_none_or(|author| listing.author.to_lowercase().contains(author))
            })
            .collect();

        let mut dtos = listing_dtos(self.db, listings).await?;

        if let Some(ListingOrdering::OwnerRating { descending }) = ordering {
            dtos.sort_by(|a, b| compare_owner_rating(a, b, descending));
        }

        Ok(dtos)
    }

    /// Replace a listing's fields, only its owner may do so
    ///
    /// A status in the request moves the listing through its state machine, see
    /// [`check_status_transition`]. Without one the current status is kept.
    pub async fn update_listing(
        &self,
        user_id: i32,
        listing_id: i32,
        listing: BookListingRequestDto,
    ) -> Result<BookListingDto, Error> {
        let listing_repo = ListingRepository::new(self.db);
        let existing = listing_repo
            .get(listing_id)
            .await?
            .ok_or(ListingError::NotFound(listing_id))?;

        if existing.owner_id != Some(user_id) {
            return Err(ListingError::NotOwner {
                user_id,
                listing_id,
            }
            .into());
        }

        let status = listing
            .status
            .map(ListingStatus::from)
            .unwrap_or(existing.status);
        check_status_transition(existing.status, status)?;
        let fields = validate_listing(listing, status)?;

        let listing = listing_repo
            .update(listing_id, fields)
            .await?
            .ok_or(ListingError::NotFound(listing_id))?;

        self.single_dto(listing).await
    }

    /// Delete a listing, only its owner may do so
    pub async fn delete_listing(&self, user_id: i32, listing_id: i32) -> Result<(), Error> {
        let listing_repo = ListingRepository::new(self.db);
        let existing = listing_repo
            .get(listing_id)
            .await?
            .ok_or(ListingError::NotFound(listing_id))?;

        if existing.owner_id != Some(user_id) {
            return Err(ListingError::NotOwner {
                user_id,
                listing_id,
            }
            .into());
        }

        listing_repo.delete(listing_id).await?;

        tracing::debug!(listing_id = %listing_id, "Deleted book listing");

        Ok(())
    }

    /// Completed listings with their ratings for every listing of `owner_id`
    ///
    /// # Returns
    /// - `Err(Error::ListingError(ListingError::OwnerHasNoListings))` - The owner has never
    ///   listed a book
    pub async fn get_ratings_by_owner(
        &self,
        owner_id: i32,
    ) -> Result<Vec<CompletedListingDto>, Error> {
        if !ListingRepository::new(self.db)
            .exists_for_owner(owner_id)
            .await?
        {
            return Err(ListingError::OwnerHasNoListings(owner_id).into());
        }

        let completed = CompletedListingRepository::new(self.db)
            .get_by_owner(owner_id)
            .await?;
        let (completed, listings): (Vec<_>, Vec<_>) = completed.into_iter().unzip();

        let dtos = listing_dtos(self.db, listings).await?;

        Ok(completed
            .into_iter()
            .zip(dtos)
            .map(|(completed, book_listing)| CompletedListingDto {
                id: completed.id,
                book_listing,
                seller_rating: completed.seller_rating,
                buyer_rating: completed.buyer_rating,
            })
            .collect())
    }

    async fn single_dto(&self, listing: BookListingModel) -> Result<BookListingDto, Error> {
        let listing_id = listing.id;

        listing_dtos(self.db, vec![listing])
            .await?
            .pop()
            .ok_or_else(|| {
                Error::InternalError(format!("Failed to build book listing ID {}", listing_id))
            })
    }
}

/// Build the public representation of `listings`, in the same order, with their owners
pub async fn listing_dtos<C: ConnectionTrait>(
    db: &C,
    listings: Vec<BookListingModel>,
) -> Result<Vec<BookListingDto>, DbErr> {
    let mut owner_ids: Vec<i32> = listings
        .iter()
        .filter_map(|listing| listing.owner_id)
        .collect();
    owner_ids.sort_unstable();
    owner_ids.dedup();

    let owners = UserRepository::new(db).get_many(&owner_ids).await?;
    let owners = user_dtos(db, owners).await?;

    Ok(listings
        .into_iter()
        .map(|listing| listing_to_dto(listing, &owners))
        .collect())
}

fn listing_to_dto(
    listing: BookListingModel,
    owners: &HashMap<i32, crate::model::user::UserDto>,
) -> BookListingDto {
    BookListingDto {
        owner: listing
            .owner_id
            .and_then(|owner_id| owners.get(&owner_id))
            .cloned(),
        id: listing.id,
        price: Decimal::new(listing.price_cents, 2),
        author: listing.author,
        name: listing.name,
        edition: listing.edition,
        condition: listing.condition,
        class_number: listing.class_number,
        professor: listing.professor,
        status: listing.status.into(),
    }
}

/// Check a listing may move from `from` to `to`
///
/// Reachable transitions are `active -> sold | archived`, `sold -> archived` and
/// `archived -> active`. Keeping the same status is always allowed.
pub fn check_status_transition(from: ListingStatus, to: ListingStatus) -> Result<(), ListingError> {
    use ListingStatus::{Active, Archived, Sold};

    match (from, to) {
        (from, to) if from == to => Ok(()),
        (Active, Sold) | (Active, Archived) | (Sold, Archived) | (Archived, Active) => Ok(()),
        (from, to) => Err(ListingError::InvalidStatusTransition { from, to }),
    }
}

fn validate_listing(
    listing: BookListingRequestDto,
    status: ListingStatus,
) -> Result<ListingFields, ListingError> {
    validate_text("name", &listing.name, MAX_TITLE_LENGTH, true)?;
    validate_text("author", &listing.author, MAX_TITLE_LENGTH, true)?;
    validate_text("condition", &listing.condition, MAX_TEXT_LENGTH, false)?;
    validate_text("class_number", &listing.class_number, MAX_TEXT_LENGTH, false)?;
    validate_text("professor", &listing.professor, MAX_TEXT_LENGTH, false)?;

    let price_cents = price_to_cents(listing.price)?;

    Ok(ListingFields {
        name: listing.name,
        author: listing.author,
        price_cents,
        edition: listing.edition,
        condition: listing.condition,
        class_number: listing.class_number,
        professor: listing.professor,
        status,
    })
}

fn validate_text(
    field: &'static str,
    value: &str,
    max_length: usize,
    required: bool,
) -> Result<(), ListingError> {
    if required && value.trim().is_empty() {
        return Err(ListingError::InvalidField {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    if value.chars().count() > max_length {
        return Err(ListingError::InvalidField {
            field,
            reason: format!("must be at most {} characters", max_length),
        });
    }

    Ok(())
}

/// Convert a price to cents, rejecting more than 2 decimal places and out of range values
pub fn price_to_cents(price: Decimal) -> Result<i64, ListingError> {
    let invalid = |reason: &str| ListingError::InvalidField {
        field: "price",
        reason: reason.to_string(),
    };

    if price.normalize().scale() > 2 {
        return Err(invalid("must have at most 2 decimal places"));
    }

    let cents = price
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.to_i64())
        .ok_or_else(|| invalid("must be at most 9999.99"))?;

    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(invalid("must be between 0 and 9999.99"));
    }

    Ok(cents)
}

fn compare_owner_rating(a: &BookListingDto, b: &BookListingDto, descending: bool) -> Ordering {
    let rating = |listing: &BookListingDto| listing.owner.as_ref().and_then(|owner| owner.seller_rating.0);

    match (rating(a), rating(b)) {
        (Some(a), Some(b)) if descending => b.total_cmp(&a),
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl From<ListingStatusDto> for ListingStatus {
    fn from(status: ListingStatusDto) -> Self {
        match status {
            ListingStatusDto::Active => Self::Active,
            ListingStatusDto::Sold => Self::Sold,
            ListingStatusDto::Archived => Self::Archived,
        }
    }
}

impl From<ListingStatus> for ListingStatusDto {
    fn from(status: ListingStatus) -> Self {
        match status {
            ListingStatus::Active => Self::Active,
            ListingStatus::Sold => Self::Sold,
            ListingStatus::Archived => Self::Archived,
        }
    }
}
