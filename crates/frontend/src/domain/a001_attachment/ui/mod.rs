pub mod attachment_chip;
