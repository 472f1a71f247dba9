mod medicine_record;

pub use medicine_record::MedicineRecord;
