//! Database seeding for local development and demos.
//!
//! Populates the portal with an admin account, regular users, student records,
//! and a term's worth of content: assignments, resources, a weekly breakdown,
//! and a discussion board with replies and comments.
//!
//! All seeded accounts share the password `password123` (hashed once, at a
//! low bcrypt cost, so seeding stays fast).

use chrono::{Duration, NaiveDate, Utc};
use fake::Fake;
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::faker::name::en::Name;
use sqlx::PgPool;
use std::time::Instant;

pub struct SeedConfig {
    pub users: usize,
    pub students: usize,
    pub assignments: usize,
    pub resources: usize,
    pub weeks: usize,
    pub topics: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            users: 10,
            students: 40,
            assignments: 6,
            resources: 12,
            weeks: 12,
            topics: 8,
        }
    }
}

const SEED_PASSWORD: &str = "password123";

pub async fn seed_all(db: &PgPool, config: SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();

    println!("🌱 Seeding database...");
    println!(
        "   - {} users, {} students, {} assignments, {} resources, {} weeks, {} topics",
        config.users,
        config.students,
        config.assignments,
        config.resources,
        config.weeks,
        config.topics
    );

    let password_hash = bcrypt::hash(SEED_PASSWORD, 4)?;

    let author_names = seed_users(db, config.users, &password_hash).await?;
    seed_students(db, config.students, &password_hash).await?;
    seed_assignments(db, config.assignments, &author_names).await?;
    seed_resources(db, config.resources, &author_names).await?;
    seed_weeks(db, config.weeks, &author_names).await?;
    seed_topics(db, config.topics, &author_names).await?;

    println!("✅ Seeding complete in {:.2?}", start_time.elapsed());
    println!("   Admin login: admin@courseboard.test / {}", SEED_PASSWORD);

    Ok(())
}

/// Insert the admin plus regular users. Returns the names used, so content
/// seeding can attribute comments and topics to real accounts.
async fn seed_users(
    db: &PgPool,
    count: usize,
    password_hash: &str,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query(
        "INSERT INTO users (name, email, password, is_admin)
         VALUES ('Course Admin', 'admin@courseboard.test', $1, TRUE)
         ON CONFLICT (email) DO NOTHING",
    )
    .bind(password_hash)
    .execute(db)
    .await?;

    let mut names = Vec::with_capacity(count);
    for i in 0..count {
        let name: String = Name().fake();
        sqlx::query(
            "INSERT INTO users (name, email, password)
             VALUES ($1, $2, $3)
             ON CONFLICT (email) DO NOTHING",
        )
        .bind(&name)
        .bind(format!("user{}@courseboard.test", i + 1))
        .bind(password_hash)
        .execute(db)
        .await?;
        names.push(name);
    }

    println!("   👤 {} users", count + 1);
    Ok(names)
}

async fn seed_students(db: &PgPool, count: usize, password_hash: &str) -> Result<(), sqlx::Error> {
    for i in 0..count {
        let name: String = Name().fake();
        sqlx::query(
            "INSERT INTO students (student_id, name, email, password)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (student_id) DO NOTHING",
        )
        .bind(format!("S-2026-{:04}", i + 1))
        .bind(&name)
        .bind(format!("student{}@uni.test", i + 1))
        .bind(password_hash)
        .execute(db)
        .await?;
    }

    println!("   🎓 {} students", count);
    Ok(())
}

fn term_start() -> NaiveDate {
    Utc::now().date_naive()
}

async fn seed_assignments(
    db: &PgPool,
    count: usize,
    authors: &[String],
) -> Result<(), sqlx::Error> {
    for i in 0..count {
        let due_date = term_start() + Duration::weeks(2 * (i as i64 + 1));
        let description: String = Paragraph(2..4).fake();
        let assignment_id: uuid::Uuid = sqlx::query_scalar(
            "INSERT INTO assignments (title, description, due_date, files)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(format!("Assignment {}", i + 1))
        .bind(&description)
        .bind(due_date)
        .bind(vec![format!("assignment-{}-brief.pdf", i + 1)])
        .fetch_one(db)
        .await?;

        for author in authors.iter().take(2) {
            let text: String = Sentence(4..12).fake();
            sqlx::query(
                "INSERT INTO assignment_comments (assignment_id, author, text) VALUES ($1, $2, $3)",
            )
            .bind(assignment_id)
            .bind(author)
            .bind(&text)
            .execute(db)
            .await?;
        }
    }

    println!("   📝 {} assignments", count);
    Ok(())
}

async fn seed_resources(db: &PgPool, count: usize, authors: &[String]) -> Result<(), sqlx::Error> {
    for i in 0..count {
        let title: String = Sentence(2..5).fake();
        let description: String = Paragraph(1..3).fake();
        let resource_id: uuid::Uuid = sqlx::query_scalar(
            "INSERT INTO resources (title, description, link)
             VALUES ($1, $2, $3)
             RETURNING id",
        )
        .bind(title.trim_end_matches('.'))
        .bind(&description)
        .bind(format!("https://resources.courseboard.test/{}", i + 1))
        .fetch_one(db)
        .await?;

        if let Some(author) = authors.get(i % authors.len().max(1)) {
            let text: String = Sentence(4..12).fake();
            sqlx::query(
                "INSERT INTO resource_comments (resource_id, author, text) VALUES ($1, $2, $3)",
            )
            .bind(resource_id)
            .bind(author)
            .bind(&text)
            .execute(db)
            .await?;
        }
    }

    println!("   📚 {} resources", count);
    Ok(())
}

async fn seed_weeks(db: &PgPool, count: usize, authors: &[String]) -> Result<(), sqlx::Error> {
    for i in 0..count {
        let start_date = term_start() + Duration::weeks(i as i64);
        let description: String = Paragraph(1..3).fake();
        let week_id: uuid::Uuid = sqlx::query_scalar(
            "INSERT INTO weeks (title, start_date, description, links)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(format!("Week {}", i + 1))
        .bind(start_date)
        .bind(&description)
        .bind(vec![format!(
            "https://slides.courseboard.test/week-{}",
            i + 1
        )])
        .fetch_one(db)
        .await?;

        if let Some(author) = authors.first() {
            let text: String = Sentence(4..12).fake();
            sqlx::query("INSERT INTO week_comments (week_id, author, text) VALUES ($1, $2, $3)")
                .bind(week_id)
                .bind(author)
                .bind(&text)
                .execute(db)
                .await?;
        }
    }

    println!("   📅 {} weeks", count);
    Ok(())
}

async fn seed_topics(db: &PgPool, count: usize, authors: &[String]) -> Result<(), sqlx::Error> {
    for i in 0..count {
        let subject: String = Sentence(3..8).fake();
        let message: String = Paragraph(1..4).fake();
        let author = authors
            .get(i % authors.len().max(1))
            .map(String::as_str)
            .unwrap_or("Course Admin");

        let topic_id: uuid::Uuid = sqlx::query_scalar(
            "INSERT INTO topics (subject, message, author)
             VALUES ($1, $2, $3)
             RETURNING id",
        )
        .bind(subject.trim_end_matches('.'))
        .bind(&message)
        .bind(author)
        .fetch_one(db)
        .await?;

        for author in authors.iter().skip(1).take(3) {
            let text: String = Sentence(4..15).fake();
            sqlx::query("INSERT INTO replies (topic_id, text, author) VALUES ($1, $2, $3)")
                .bind(topic_id)
                .bind(&text)
                .bind(author)
                .execute(db)
                .await?;
        }
    }

    println!("   💬 {} topics", count);
    Ok(())
}
