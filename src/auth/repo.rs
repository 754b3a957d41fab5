use sqlx::PgConnection;

use crate::auth::repo_types::StudentRecord;

/// Idempotently ensure the students table exists. Uniqueness of
/// `student_id` and the image/mime pairing are declared in-schema so the
/// store, not the application, arbitrates them.
pub async fn ensure_schema(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS students (
            student_id VARCHAR(50) PRIMARY KEY,
            password_hash TEXT NOT NULL,
            image_data BYTEA,
            mime_type VARCHAR(50),
            CHECK ((image_data IS NULL) = (mime_type IS NULL))
        )
        "#,
    )
    .execute(conn)
    .await?;
    Ok(())
}

/// Find a student by id.
pub async fn find_by_student_id(
    conn: &mut PgConnection,
    student_id: &str,
) -> Result<Option<StudentRecord>, sqlx::Error> {
    let record = sqlx::query_as::<_, StudentRecord>(
        r#"
        SELECT student_id, password_hash, image_data, mime_type
        FROM students
        WHERE student_id = $1
        "#,
    )
    .bind(student_id)
    .fetch_optional(conn)
    .await?;
    Ok(record)
}

/// Insert a new student with a hashed password. Image columns start absent;
/// nothing in scope populates them after registration. A duplicate id
/// surfaces as a unique violation from the store.
pub async fn insert_student(
    conn: &mut PgConnection,
    student_id: &str,
    password_hash: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO students (student_id, password_hash)
        VALUES ($1, $2)
        "#,
    )
    .bind(student_id)
    .bind(password_hash)
    .execute(conn)
    .await?;
    Ok(())
}

/// SQLSTATE 23505: unique_violation.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505"))
}
