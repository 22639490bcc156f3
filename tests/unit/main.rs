// Unit test suite for public model types

mod models;
