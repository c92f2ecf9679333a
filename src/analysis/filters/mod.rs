pub mod stemmer;
pub mod stopword;
pub mod word_shape;
