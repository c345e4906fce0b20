/// The [`DatabaseConnectionProvider`] trait provides a way to get a connection to the database.
/// This is implemented by the [`crate::Database`] and [`crate::DatabaseTransaction`] types.
pub trait DatabaseConnectionProvider {
    /// The connection type, which implements the sea-orm `ConnectionTrait` and can open a
    /// transaction (a savepoint when the connection is itself a transaction).
    type Connection: sea_orm::ConnectionTrait + sea_orm::TransactionTrait;

    /// Returns a reference to the database connection.
    fn get_connection(&self) -> &Self::Connection;
}
