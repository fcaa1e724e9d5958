//! SQLite 错误分类
//!
//! 驱动层错误只在这里被解析，仓储之外只能看到 `DomainError`。

use std::io;

use sqlx::error::DatabaseError;

use crate::domain::DomainError;

/// 从驱动错误中识别出的信号
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverSignal {
    UniqueViolation,
    RecordNotFound,
    Deadlock,
    LockWaitTimeout,
    ConnectionDropped,
    ConnectionLost,
    Unrecognized,
}

// SQLite 扩展错误码
const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;
const SQLITE_CONSTRAINT_PRIMARYKEY: i32 = 1555;
const SQLITE_CONSTRAINT_UNIQUE: i32 = 2067;

impl DriverSignal {
    pub fn from_sqlx(err: &sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DriverSignal::RecordNotFound,
            sqlx::Error::PoolTimedOut => DriverSignal::LockWaitTimeout,
            sqlx::Error::WorkerCrashed => DriverSignal::ConnectionLost,
            sqlx::Error::Io(io_err) => Self::from_io(io_err),
            sqlx::Error::Database(db_err) => Self::from_database(db_err.as_ref()),
            _ => DriverSignal::Unrecognized,
        }
    }

    /// 按扩展错误码识别，BUSY / LOCKED 的所有扩展码都按主码处理
    pub fn from_sqlite_code(code: &str) -> Self {
        let Ok(code) = code.trim().parse::<i32>() else {
            return DriverSignal::Unrecognized;
        };

        match code {
            SQLITE_CONSTRAINT_UNIQUE | SQLITE_CONSTRAINT_PRIMARYKEY => DriverSignal::UniqueViolation,
            c if c & 0xff == SQLITE_LOCKED => DriverSignal::Deadlock,
            c if c & 0xff == SQLITE_BUSY => DriverSignal::LockWaitTimeout,
            _ => DriverSignal::Unrecognized,
        }
    }

    fn from_database(err: &dyn DatabaseError) -> Self {
        let by_code = err
            .code()
            .map(|code| Self::from_sqlite_code(&code))
            .unwrap_or(DriverSignal::Unrecognized);

        if by_code == DriverSignal::Unrecognized && err.is_unique_violation() {
            return DriverSignal::UniqueViolation;
        }
        by_code
    }

    fn from_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe => DriverSignal::ConnectionDropped,
            io::ErrorKind::NotConnected | io::ErrorKind::UnexpectedEof => {
                DriverSignal::ConnectionLost
            }
            _ => DriverSignal::Unrecognized,
        }
    }
}

/// 把驱动错误转换为领域错误
///
/// `resource` / `id` 只用于 NotFound 和唯一约束冲突的消息。
pub fn classify(err: sqlx::Error, resource: &str, id: &str) -> DomainError {
    match DriverSignal::from_sqlx(&err) {
        DriverSignal::UniqueViolation => {
            DomainError::validation(format!("{} already exists", resource))
        }
        DriverSignal::RecordNotFound => DomainError::not_found(resource, id),
        DriverSignal::Deadlock
        | DriverSignal::LockWaitTimeout
        | DriverSignal::ConnectionDropped
        | DriverSignal::ConnectionLost => DomainError::transient(err),
        DriverSignal::Unrecognized => DomainError::unexpected(err),
    }
}
