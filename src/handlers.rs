pub mod catalogo;
pub mod formulario;
pub mod pedidos;
