//! Receipt copy: turns an [`InstallmentView`] into the lines a buyer reads.

mod copy;

pub use copy::{EnglishReceiptCopy, ReceiptContext, ReceiptCopy, ReceiptMessages};
