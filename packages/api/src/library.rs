//! # Server-side implementation of the library actions
//!
//! Every function takes the pool (or a transaction) plus an already
//! authenticated member id and returns [`ServerError`] for anything that is not
//! an answer the member should read. Refusals the member should read are
//! returned as values ([`ActionResult::Failure`], [`BorrowReceipt::refused`]).

use sqlx::PgPool;
use store::{
    ActionResult, Book, BookId, BookPage, BorrowReceipt, FavoriteBook, LibraryConfig, ListingQuery,
    MemberId, ProfileUpdate, Professor, UserProfile,
};

use crate::auth::{hash_password, verify_password};
use crate::error::ServerError;
use crate::models::{BookRow, MemberRow, ProfessorRow};
use crate::validation::{
    check_new_password, clean_profile_update, may_adjust_credits, normalize_email, search_pattern,
};

pub async fn find_member(pool: &PgPool, member_id: MemberId) -> Result<Option<MemberRow>, ServerError> {
    Ok(sqlx::query_as("SELECT * FROM members WHERE id = $1")
        .bind(member_id)
        .fetch_optional(pool)
        .await?)
}

/// Check email and password; `None` for any mismatch.
pub async fn authenticate(
    pool: &PgPool,
    email: &str,
    password: &str,
) -> Result<Option<MemberRow>, ServerError> {
    let member: Option<MemberRow> = sqlx::query_as("SELECT * FROM members WHERE email = $1")
        .bind(normalize_email(email))
        .fetch_optional(pool)
        .await?;

    let Some(member) = member else {
        return Ok(None);
    };
    let Some(ref hash) = member.password_hash else {
        return Ok(None);
    };
    if verify_password(password, hash)? {
        Ok(Some(member))
    } else {
        Ok(None)
    }
}

pub async fn list_books(
    pool: &PgPool,
    config: &LibraryConfig,
    query: &ListingQuery,
) -> Result<BookPage, ServerError> {
    let genre = query.genre.as_deref();
    let pattern = search_pattern(query.search.as_deref());

    let (total,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM books
         WHERE ($1::text IS NULL OR genre = $1)
           AND ($2::text IS NULL OR title ILIKE $2 OR author ILIKE $2)",
    )
    .bind(genre)
    .bind(pattern.as_deref())
    .fetch_one(pool)
    .await?;
    let total_pages = config.total_pages(total);
    let page = query.page.min(total_pages);

    let books: Vec<BookRow> = sqlx::query_as(
        "SELECT * FROM books
         WHERE ($1::text IS NULL OR genre = $1)
           AND ($2::text IS NULL OR title ILIKE $2 OR author ILIKE $2)
         ORDER BY title, id LIMIT $3 OFFSET $4",
    )
    .bind(genre)
    .bind(pattern.as_deref())
    .bind(i64::from(config.listing.page_size))
    .bind(config.offset_for_page(page))
    .fetch_all(pool)
    .await?;

    let recently_added: Vec<BookRow> =
        sqlx::query_as("SELECT * FROM books ORDER BY created_at DESC, id DESC LIMIT $1")
            .bind(i64::from(config.listing.recently_added))
            .fetch_all(pool)
            .await?;

    let genres: Vec<String> = sqlx::query_scalar("SELECT DISTINCT genre FROM books ORDER BY genre")
        .fetch_all(pool)
        .await?;

    Ok(BookPage {
        books: books.into_iter().map(Book::from).collect(),
        recently_added: recently_added.into_iter().map(Book::from).collect(),
        current_page: page,
        total_pages,
        genres,
        selected_genre: query.genre.clone(),
    })
}

pub async fn favorites(pool: &PgPool, member_id: MemberId) -> Result<Vec<Book>, ServerError> {
    let rows: Vec<BookRow> = sqlx::query_as(
        "SELECT b.* FROM books b
         JOIN favorites f ON f.book_id = b.id
         WHERE f.member_id = $1
         ORDER BY f.created_at DESC",
    )
    .bind(member_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Book::from).collect())
}

pub async fn add_favorite(pool: &PgPool, member_id: MemberId, book_id: BookId) -> Result<(), ServerError> {
    sqlx::query(
        "INSERT INTO favorites (member_id, book_id) VALUES ($1, $2)
         ON CONFLICT (member_id, book_id) DO NOTHING",
    )
    .bind(member_id)
    .bind(book_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn remove_favorite(pool: &PgPool, member_id: MemberId, book_id: BookId) -> Result<(), ServerError> {
    sqlx::query("DELETE FROM favorites WHERE member_id = $1 AND book_id = $2")
        .bind(member_id)
        .bind(book_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Lend one copy of `book_id` to the member.
pub async fn borrow(
    pool: &PgPool,
    config: &LibraryConfig,
    member_id: MemberId,
    book_id: BookId,
) -> Result<BorrowReceipt, ServerError> {
    let mut tx = pool.begin().await?;

    // Lock the book row so concurrent borrows see the decremented count.
    let available: Option<(i32,)> =
        sqlx::query_as("SELECT available_copies FROM books WHERE id = $1 FOR UPDATE")
            .bind(book_id)
            .fetch_optional(&mut *tx)
            .await?;

    let Some((available,)) = available else {
        return Ok(BorrowReceipt::refused("Book not found"));
    };
    if available <= 0 {
        return Ok(BorrowReceipt::refused("Book is not available"));
    }

    let active: Option<(i64,)> = sqlx::query_as(
        "SELECT id FROM transactions WHERE member_id = $1 AND book_id = $2 AND status = 'issued'",
    )
    .bind(member_id)
    .bind(book_id)
    .fetch_optional(&mut *tx)
    .await?;
    if active.is_some() {
        return Ok(BorrowReceipt::refused("You have already borrowed this book"));
    }

    sqlx::query("UPDATE books SET available_copies = available_copies - 1 WHERE id = $1")
        .bind(book_id)
        .execute(&mut *tx)
        .await?;

    let loan_days = i32::try_from(config.loans.loan_days).unwrap_or(i32::MAX);
    sqlx::query(
        "INSERT INTO transactions (member_id, book_id, status, due_date)
         VALUES ($1, $2, 'issued', CURRENT_DATE + $3::int)",
    )
    .bind(member_id)
    .bind(book_id)
    .bind(loan_days)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    tracing::info!("Member {} borrowed book {}", member_id, book_id);
    Ok(BorrowReceipt::borrowed("Book borrowed successfully"))
}

pub async fn profile(pool: &PgPool, member_id: MemberId) -> Result<ActionResult<UserProfile>, ServerError> {
    let Some(member) = find_member(pool, member_id).await? else {
        return Ok(ActionResult::failure("Member not found"));
    };

    let favorites: Vec<BookRow> = sqlx::query_as(
        "SELECT b.* FROM books b
         JOIN favorites f ON f.book_id = b.id
         WHERE f.member_id = $1
         ORDER BY b.title",
    )
    .bind(member_id)
    .fetch_all(pool)
    .await?;
    let favorites = favorites
        .into_iter()
        .map(Book::from)
        .map(|b| FavoriteBook::from(&b))
        .collect();

    Ok(ActionResult::success(member.to_profile(favorites)))
}

pub async fn update_profile(
    pool: &PgPool,
    member_id: MemberId,
    update: ProfileUpdate,
) -> Result<ActionResult<String>, ServerError> {
    let update = match clean_profile_update(update) {
        Ok(update) => update,
        Err(message) => return Ok(ActionResult::failure(message)),
    };

    sqlx::query(
        "UPDATE members SET first_name = $2, last_name = $3, phone_number = $4, updated_at = NOW()
         WHERE id = $1",
    )
    .bind(member_id)
    .bind(&update.first_name)
    .bind(&update.last_name)
    .bind(&update.phone_number)
    .execute(pool)
    .await?;

    Ok(ActionResult::success("Profile updated successfully".to_string()))
}

pub async fn change_password(
    pool: &PgPool,
    member_id: MemberId,
    current: &str,
    new: &str,
) -> Result<ActionResult<String>, ServerError> {
    let Some(member) = find_member(pool, member_id).await? else {
        return Ok(ActionResult::failure("Member not found"));
    };
    let verified = match member.password_hash.as_deref() {
        Some(hash) => verify_password(current, hash)?,
        None => false,
    };
    if !verified {
        return Ok(ActionResult::failure("Current password is incorrect"));
    }
    if let Err(message) = check_new_password(new) {
        return Ok(ActionResult::failure(message));
    }

    let hash = hash_password(new)?;
    sqlx::query("UPDATE members SET password_hash = $2, updated_at = NOW() WHERE id = $1")
        .bind(member_id)
        .bind(&hash)
        .execute(pool)
        .await?;

    Ok(ActionResult::success("Password changed successfully".to_string()))
}

/// Adjust `target`'s balance. Members may only change their own; admins any.
pub async fn adjust_credits(
    pool: &PgPool,
    caller: MemberId,
    target: MemberId,
    delta: i32,
) -> Result<(), ServerError> {
    let is_admin = find_member(pool, caller)
        .await?
        .is_some_and(|m| m.is_admin());
    if !may_adjust_credits(caller, target, delta, is_admin) {
        tracing::warn!("Member {} may not adjust credits of {} by {}", caller, target, delta);
        return Err(ServerError::Forbidden);
    }

    let updated = sqlx::query(
        "UPDATE members SET credits = credits + $2, updated_at = NOW() WHERE id = $1",
    )
    .bind(target)
    .bind(delta)
    .execute(pool)
    .await?;
    if updated.rows_affected() == 0 {
        return Err(ServerError::Database(sqlx::Error::RowNotFound));
    }

    tracing::info!("Adjusted credits of member {} by {}", target, delta);
    Ok(())
}

pub async fn professors(pool: &PgPool) -> Result<Vec<Professor>, ServerError> {
    let rows: Vec<ProfessorRow> = sqlx::query_as("SELECT * FROM professors ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Professor::from).collect())
}

pub async fn professor(pool: &PgPool, id: i64) -> Result<Option<Professor>, ServerError> {
    let row: Option<ProfessorRow> = sqlx::query_as("SELECT * FROM professors WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Professor::from))
}
