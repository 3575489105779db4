//! Runs the data service conformance suite against `InMemoryDataService`

#[macro_use]
mod storage_harness;

use gestor::storage::InMemoryDataService;
use storage_harness::*;

data_service_tests!(InMemoryDataService::<TestRecord>::new());
