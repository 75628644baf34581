pub mod entrypoint;
pub mod error;
pub mod event;
pub mod instruction;
pub mod processor;
pub mod state;

solana_program::declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");
