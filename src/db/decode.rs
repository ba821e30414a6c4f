use sqlx::{
    postgres::{PgRow, Postgres},
    types::BigDecimal,
    FromRow, Row, ValueRef,
};

use crate::models::{Movie, Rating};

/// A numeric cell read from whichever numeric type the column was declared with
#[derive(Debug, Clone, PartialEq)]
pub enum Numeric {
    Int(i64),
    Float(f64),
    Decimal(BigDecimal),
}

impl Numeric {
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Numeric::Int(v) => Some(*v as f64),
            Numeric::Float(v) => Some(*v),
            Numeric::Decimal(d) => d.to_string().parse::<f64>().ok(),
        }
    }

    /// Integral value; fractional values are rejected
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Numeric::Int(v) => Some(*v),
            Numeric::Float(_) => None,
            Numeric::Decimal(d) if d.is_integer() => d.with_scale(0).to_string().parse().ok(),
            Numeric::Decimal(_) => None,
        }
    }

    pub fn to_i32(&self) -> Option<i32> {
        self.to_i64().and_then(|v| i32::try_from(v).ok())
    }
}

/// Builds the error sqlx reports for an undecodable column
pub fn decode_error(column: &str, reason: &str) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: reason.into(),
    }
}

/// Decodes `column` as `T`, or `None` when the column has another SQL type
fn attempt<'r, T>(row: &'r PgRow, column: &str) -> Result<Option<T>, sqlx::Error>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    match row.try_get::<T, _>(column) {
        Ok(value) => Ok(Some(value)),
        Err(sqlx::Error::ColumnDecode { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Reads an INT8, INT4, INT2, FLOAT8, FLOAT4 or NUMERIC column
pub fn numeric_column(row: &PgRow, column: &str) -> Result<Numeric, sqlx::Error> {
    if let Some(v) = attempt::<i64>(row, column)? {
        return Ok(Numeric::Int(v));
    }
    if let Some(v) = attempt::<i32>(row, column)? {
        return Ok(Numeric::Int(v.into()));
    }
    if let Some(v) = attempt::<i16>(row, column)? {
        return Ok(Numeric::Int(v.into()));
    }
    if let Some(v) = attempt::<f64>(row, column)? {
        return Ok(Numeric::Float(v));
    }
    if let Some(v) = attempt::<f32>(row, column)? {
        return Ok(Numeric::Float(v.into()));
    }
    if let Some(v) = attempt::<BigDecimal>(row, column)? {
        return Ok(Numeric::Decimal(v));
    }

    Err(decode_error(column, "expected a non-null integer, float or numeric value"))
}

/// Like [`numeric_column`], but a missing column or NULL reads as `None`
fn optional_numeric(row: &PgRow, column: &str) -> Result<Option<Numeric>, sqlx::Error> {
    match row.try_get_raw(column) {
        Ok(value) if value.is_null() => Ok(None),
        Ok(_) => numeric_column(row, column).map(Some),
        Err(sqlx::Error::ColumnNotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Decodes an optional column; a missing column reads as `None`
fn optional<'r, T>(row: &'r PgRow, column: &str) -> Result<Option<T>, sqlx::Error>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    match row.try_get::<Option<T>, _>(column) {
        Ok(value) => Ok(value),
        Err(sqlx::Error::ColumnNotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

fn id_column(row: &PgRow, column: &str) -> Result<i64, sqlx::Error> {
    numeric_column(row, column)?
        .to_i64()
        .ok_or_else(|| decode_error(column, "identifier is not an integer"))
}

impl<'r> FromRow<'r, PgRow> for Rating {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let rating = numeric_column(row, "rating")?
            .to_f64()
            .ok_or_else(|| decode_error("rating", "rating is not representable as f64"))?;

        Ok(Rating::new(
            id_column(row, "user_id")?,
            id_column(row, "movie_id")?,
            rating,
        ))
    }
}

impl<'r> FromRow<'r, PgRow> for Movie {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let mut movie = Movie::new(id_column(row, "movie_id")?, row.try_get::<String, _>("title")?);

        movie.genre = optional(row, "genre")?;
        movie.release_date = optional(row, "rdate")?;
        movie.runtime_minutes = match optional_numeric(row, "runtime")? {
            Some(runtime) => Some(
                runtime
                    .to_i32()
                    .ok_or_else(|| decode_error("runtime", "runtime is not a 32-bit integer"))?,
            ),
            None => None,
        };
        movie.description = optional(row, "description")?;
        movie.trailer_url = optional(row, "trailer_url")?;

        Ok(movie)
    }
}
