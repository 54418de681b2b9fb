pub mod pettersen_detroit;
