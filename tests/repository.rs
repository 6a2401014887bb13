use chrono::Utc;
use pushkind_directory::domain::business::{BusinessUpdate, NewBusiness};
use pushkind_directory::domain::category::{CategoryUpdate, NewCategory};
use pushkind_directory::domain::review::NewReview;
use pushkind_directory::domain::search::SearchQuery;
use pushkind_directory::domain::types::{
    BusinessAddress, BusinessDescription, BusinessId, BusinessName, BusinessPhone, BusinessPhotos,
    CategoryId, CategoryName, CategorySlug, EmailAddress, ReviewComment, ReviewRating, UserId,
};
use pushkind_directory::repository::{
    BusinessReader, BusinessWriter, CategoryReader, CategoryWriter, DieselRepository,
    RepositoryError, ReviewReader, ReviewWriter,
};

mod common;

fn new_category(name: &str, slug: &str) -> NewCategory {
    let now = Utc::now().naive_utc();
    NewCategory {
        name: CategoryName::new(name).expect("valid category name"),
        slug: CategorySlug::new(slug).expect("valid slug"),
        icon: None,
        description: None,
        created_at: now,
        updated_at: now,
    }
}

fn new_business(category_id: CategoryId, name: &str, photos: &[&str]) -> NewBusiness {
    let now = Utc::now().naive_utc();
    NewBusiness {
        category_id,
        name: BusinessName::new(name).expect("valid name"),
        description: BusinessDescription::new("Seaside coffee").expect("valid description"),
        address: BusinessAddress::new("1 Harbour Road").expect("valid address"),
        phone: BusinessPhone::new("+1 555 0100").expect("valid phone"),
        email: Some(EmailAddress::new("hello@bluelagoon.example").expect("valid email")),
        website: None,
        photos: BusinessPhotos::try_from(
            photos.iter().map(|p| p.to_string()).collect::<Vec<_>>(),
        )
        .expect("valid photos"),
        created_at: now,
        updated_at: now,
    }
}

fn new_review(business_id: BusinessId, user_id: i32, rating: f64) -> NewReview {
    NewReview {
        business_id,
        user_id: UserId::new(user_id).expect("valid user id"),
        rating: ReviewRating::new(rating).expect("valid rating"),
        comment: ReviewComment::new("Lovely spot").expect("valid comment"),
        created_at: Utc::now().naive_utc(),
    }
}

#[test]
fn category_name_and_slug_are_unique() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    repo.create_category(&new_category("Restaurants", "restaurants"))
        .expect("should create category");

    let same_name = repo.create_category(&new_category("Restaurants", "eateries"));
    assert!(matches!(
        same_name,
        Err(RepositoryError::ConstraintViolation(_))
    ));

    let same_slug = repo.create_category(&new_category("Eateries", "restaurants"));
    assert!(matches!(
        same_slug,
        Err(RepositoryError::ConstraintViolation(_))
    ));

    assert_eq!(repo.list_categories().expect("should list").len(), 1);
}

#[test]
fn update_category_applies_partial_changes() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = repo
        .create_category(&new_category("Cafes", "cafes"))
        .expect("should create category");
    let update = CategoryUpdate {
        name: Some(CategoryName::new("Coffee").expect("valid name")),
        description: None,
    };

    let updated = repo
        .update_category(category.id, &update)
        .expect("should update")
        .expect("category exists");
    assert_eq!(updated.name.as_str(), "Coffee");
    assert_eq!(updated.slug.as_str(), "cafes");

    let missing = repo
        .update_category(CategoryId::new(999).expect("valid id"), &update)
        .expect("should run update");
    assert!(missing.is_none());
}

#[test]
fn category_reference_prefers_name_over_slug() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let bars = repo
        .create_category(&new_category("Bars", "pubs"))
        .expect("should create category");
    let pubs = repo
        .create_category(&new_category("pubs", "taverns"))
        .expect("should create category");

    let by_token = repo
        .find_category_by_reference("pubs")
        .expect("should query")
        .expect("should resolve");
    assert_eq!(by_token.id, pubs.id);

    let by_slug = repo
        .find_category_by_reference("taverns")
        .expect("should query")
        .expect("should resolve");
    assert_eq!(by_slug.id, pubs.id);

    let by_name = repo
        .find_category_by_reference("Bars")
        .expect("should query")
        .expect("should resolve");
    assert_eq!(by_name.id, bars.id);

    assert!(
        repo.find_category_by_reference("BARS")
            .expect("should query")
            .is_none()
    );
}

#[test]
fn business_counts_group_by_category() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let cafes = repo
        .create_category(&new_category("Cafes", "cafes"))
        .expect("should create category");
    let gyms = repo
        .create_category(&new_category("Gyms", "gyms"))
        .expect("should create category");
    repo.create_business(&new_business(cafes.id, "Blue Lagoon Cafe", &[]))
        .expect("should create business");
    repo.create_business(&new_business(cafes.id, "Morning Brew", &[]))
        .expect("should create business");

    let counts = repo
        .count_businesses_by_category()
        .expect("should count businesses");
    assert_eq!(counts.get(&cafes.id), Some(&2));
    assert_eq!(counts.get(&gyms.id), None);
}

#[test]
fn business_photos_keep_their_order() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let cafes = repo
        .create_category(&new_category("Cafes", "cafes"))
        .expect("should create category");
    let created = repo
        .create_business(&new_business(
            cafes.id,
            "Blue Lagoon Cafe",
            &["https://cdn.example.com/2.jpg", "https://cdn.example.com/1.jpg"],
        ))
        .expect("should create business");

    let listing = repo
        .get_business_by_id(created.id)
        .expect("should query")
        .expect("business exists");
    let photos = listing
        .business
        .photos
        .as_slice()
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        photos,
        ["https://cdn.example.com/2.jpg", "https://cdn.example.com/1.jpg"]
    );
    assert_eq!(listing.category.expect("category joined").name.as_str(), "Cafes");
}

#[test]
fn update_business_replaces_photos_and_keeps_reviews() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let cafes = repo
        .create_category(&new_category("Cafes", "cafes"))
        .expect("should create category");
    let created = repo
        .create_business(&new_business(
            cafes.id,
            "Blue Lagoon Cafe",
            &["https://cdn.example.com/1.jpg"],
        ))
        .expect("should create business");
    repo.add_review(&new_review(created.id, 1, 4.0))
        .expect("should add review");

    let update = BusinessUpdate {
        photos: Some(
            BusinessPhotos::try_from(vec!["https://cdn.example.com/new.jpg".to_string()])
                .expect("valid photos"),
        ),
        ..Default::default()
    };
    let updated = repo
        .update_business(created.id, &update)
        .expect("should update")
        .expect("business exists");

    assert_eq!(updated.photos.len(), 1);
    assert_eq!(
        updated.photos.as_slice()[0].as_str(),
        "https://cdn.example.com/new.jpg"
    );
    assert_eq!(updated.reviews.len(), 1);
    assert_eq!(updated.name.as_str(), "Blue Lagoon Cafe");
}

#[test]
fn review_is_unique_per_user_and_business() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let cafes = repo
        .create_category(&new_category("Cafes", "cafes"))
        .expect("should create category");
    let business = repo
        .create_business(&new_business(cafes.id, "Blue Lagoon Cafe", &[]))
        .expect("should create business");

    repo.add_review(&new_review(business.id, 1, 5.0))
        .expect("should add review");
    let duplicate = repo.add_review(&new_review(business.id, 1, 1.0));
    assert!(matches!(
        duplicate,
        Err(RepositoryError::ConstraintViolation(_))
    ));
    repo.add_review(&new_review(business.id, 2, 3.0))
        .expect("another user may review");

    let reviews = repo.list_reviews(business.id).expect("should list reviews");
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0].review.rating.get(), 5.0);
}

#[test]
fn reviews_are_widened_with_known_authors() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let alice = test_db.insert_user("Alice", "alice@example.com");

    let cafes = repo
        .create_category(&new_category("Cafes", "cafes"))
        .expect("should create category");
    let business = repo
        .create_business(&new_business(cafes.id, "Blue Lagoon Cafe", &[]))
        .expect("should create business");
    repo.add_review(&new_review(business.id, alice, 4.5))
        .expect("should add review");
    repo.add_review(&new_review(business.id, alice + 100, 2.0))
        .expect("should add review");

    let reviews = repo.list_reviews(business.id).expect("should list reviews");
    let author = reviews[0].author.as_ref().expect("author widened");
    assert_eq!(author.name.as_str(), "Alice");
    assert_eq!(author.email.as_str(), "alice@example.com");
    assert!(reviews[1].author.is_none());
}

#[test]
fn invalid_user_records_do_not_break_review_listing() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    let broken = test_db.insert_user("Mallory", "not-an-email");
    let alice = test_db.insert_user("Alice", "alice@example.com");

    let cafes = repo
        .create_category(&new_category("Cafes", "cafes"))
        .expect("should create category");
    let business = repo
        .create_business(&new_business(cafes.id, "Blue Lagoon Cafe", &[]))
        .expect("should create business");
    repo.add_review(&new_review(business.id, broken, 1.0))
        .expect("should add review");
    repo.add_review(&new_review(business.id, alice, 5.0))
        .expect("should add review");

    let reviews = repo.list_reviews(business.id).expect("should list reviews");
    assert_eq!(reviews.len(), 2);
    assert!(reviews[0].author.is_none());
    assert_eq!(
        reviews[1].author.as_ref().expect("author widened").name.as_str(),
        "Alice"
    );
}

#[test]
fn search_matches_business_and_category_fields() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let restaurants = repo
        .create_category(&new_category("Restaurants", "restaurants"))
        .expect("should create category");
    let gyms = repo
        .create_category(&new_category("Gyms", "fitness"))
        .expect("should create category");
    let cafe = repo
        .create_business(&new_business(restaurants.id, "Blue Lagoon Cafe", &[]))
        .expect("should create business");
    repo.create_business(&new_business(gyms.id, "Iron Temple", &[]))
        .expect("should create business");

    let by_name = repo
        .search_businesses(&SearchQuery::parse("lagoon").expect("non-blank"))
        .expect("should search");
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id, cafe.id);
    assert_eq!(by_name[0].category.slug.as_str(), "restaurants");

    let by_slug = repo
        .search_businesses(&SearchQuery::parse("RESTAURANTS").expect("non-blank"))
        .expect("should search");
    assert_eq!(by_slug.len(), 1);
    assert_eq!(by_slug[0].id, cafe.id);

    let by_description = repo
        .search_businesses(&SearchQuery::parse("SEASIDE").expect("non-blank"))
        .expect("should search");
    assert_eq!(by_description.len(), 2);

    let by_address = repo
        .search_businesses(&SearchQuery::parse("harbour road").expect("non-blank"))
        .expect("should search");
    assert_eq!(by_address.len(), 2);

    let by_category_name = repo
        .search_businesses(&SearchQuery::parse("gym").expect("non-blank"))
        .expect("should search");
    assert_eq!(by_category_name.len(), 1);
    assert_eq!(by_category_name[0].name.as_str(), "Iron Temple");

    let by_phone = repo
        .search_businesses(&SearchQuery::parse("555").expect("non-blank"))
        .expect("should search");
    assert_eq!(by_phone.len(), 2);
    assert!(by_phone[0].id.get() < by_phone[1].id.get());
}

#[test]
fn deleting_category_leaves_businesses_dangling() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let cafes = repo
        .create_category(&new_category("Cafes", "cafes"))
        .expect("should create category");
    let business = repo
        .create_business(&new_business(cafes.id, "Blue Lagoon Cafe", &[]))
        .expect("should create business");

    assert_eq!(repo.delete_category(cafes.id).expect("should delete"), 1);

    let listing = repo
        .get_business_by_id(business.id)
        .expect("should query")
        .expect("business survives");
    assert_eq!(listing.business.category_id, cafes.id);
    assert!(listing.category.is_none());

    let found = repo
        .search_businesses(&SearchQuery::parse("lagoon").expect("non-blank"))
        .expect("should search");
    assert!(found.is_empty());
}

#[test]
fn deleting_business_removes_photos_and_reviews() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let cafes = repo
        .create_category(&new_category("Cafes", "cafes"))
        .expect("should create category");
    let business = repo
        .create_business(&new_business(
            cafes.id,
            "Blue Lagoon Cafe",
            &["https://cdn.example.com/1.jpg"],
        ))
        .expect("should create business");
    repo.add_review(&new_review(business.id, 1, 4.0))
        .expect("should add review");

    assert_eq!(repo.delete_business(business.id).expect("should delete"), 1);
    assert_eq!(repo.delete_business(business.id).expect("should delete"), 0);
    assert!(
        repo.get_business_by_id(business.id)
            .expect("should query")
            .is_none()
    );
    assert!(
        repo.list_reviews(business.id)
            .expect("should list reviews")
            .is_empty()
    );
}
