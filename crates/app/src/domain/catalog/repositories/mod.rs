//! Catalog Repositories

mod listings;
mod sellers;

pub(crate) use listings::PgListingsRepository;
pub(crate) use sellers::PgSellersRepository;
