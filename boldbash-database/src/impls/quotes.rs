use rand::Rng;

use crate::{database::Database, model::quotes::Quote};

/// Append a quote and return its 1-based number.
pub async fn add_quote(
    db: &Database,
    text: &str,
    author: &str,
    added_by: u64,
    added_at: u64,
) -> anyhow::Result<usize> {
    let quote = Quote {
        text: text.to_owned(),
        author: author.to_owned(),
        added_by,
        added_at,
    };

    db.quotes()
        .update(move |quotes| {
            quotes.push(quote);
            quotes.len()
        })
        .await
}

/// Fetch a quote by its 1-based number.
pub async fn quote(db: &Database, number: usize) -> Option<Quote> {
    db.quotes()
        .read(|quotes| number.checked_sub(1).and_then(|index| quotes.get(index)).cloned())
        .await
}

/// Pick a random quote together with its 1-based number.
pub async fn random_quote(db: &Database) -> Option<(usize, Quote)> {
    db.quotes()
        .read(|quotes| {
            if quotes.is_empty() {
                return None;
            }
            let index = rand::rng().random_range(0..quotes.len());
            Some((index + 1, quotes[index].clone()))
        })
        .await
}

/// Remove a quote by its 1-based number, returning it when it existed.
pub async fn remove_quote(db: &Database, number: usize) -> anyhow::Result<Option<Quote>> {
    db.quotes()
        .update(|quotes| {
            let index = number.checked_sub(1).filter(|index| *index < quotes.len())?;
            Some(quotes.remove(index))
        })
        .await
}

pub async fn quote_count(db: &Database) -> usize {
    db.quotes().read(|quotes| quotes.len()).await
}

#[cfg(test)]
mod tests {
    use super::{add_quote, quote, quote_count, random_quote, remove_quote};
    use crate::database::Database;

    #[tokio::test]
    async fn quotes_are_numbered_from_one() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path()).await.unwrap();

        assert!(random_quote(&db).await.is_none());
        assert_eq!(add_quote(&db, "first", "a", 1, 0).await.unwrap(), 1);
        assert_eq!(add_quote(&db, "second", "b", 1, 0).await.unwrap(), 2);

        assert_eq!(quote(&db, 2).await.unwrap().text, "second");
        assert!(quote(&db, 0).await.is_none());
        assert!(quote(&db, 3).await.is_none());

        let (number, picked) = random_quote(&db).await.unwrap();
        assert_eq!(quote(&db, number).await.unwrap(), picked);
    }

    #[tokio::test]
    async fn removing_shifts_later_quotes() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path()).await.unwrap();

        add_quote(&db, "first", "a", 1, 0).await.unwrap();
        add_quote(&db, "second", "b", 1, 0).await.unwrap();

        assert!(remove_quote(&db, 5).await.unwrap().is_none());
        assert_eq!(remove_quote(&db, 1).await.unwrap().unwrap().text, "first");
        assert_eq!(quote_count(&db).await, 1);
        assert_eq!(quote(&db, 1).await.unwrap().text, "second");
    }
}
