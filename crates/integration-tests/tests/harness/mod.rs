pub mod mock_cma;
