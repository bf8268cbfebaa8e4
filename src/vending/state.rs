use std::fmt;

/// The states a vending machine moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VendingState {
    #[default]
    Ready,
    ProductSelect,
    ProceedPayment,
    OutOfStock,
}

impl VendingState {
    /// What the machine says when asked to act in this state.
    pub fn handle_request(self) -> &'static str {
        match self {
            VendingState::Ready => "Vending Machine started",
            VendingState::ProductSelect => "Please Select Items",
            VendingState::ProceedPayment => "Select Payment option and pay",
            VendingState::OutOfStock => "Ooops Item sold out!!!",
        }
    }

    pub const ALL: [VendingState; 4] = [
        VendingState::Ready,
        VendingState::ProductSelect,
        VendingState::ProceedPayment,
        VendingState::OutOfStock,
    ];
}

impl fmt::Display for VendingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VendingState::Ready => "ready",
            VendingState::ProductSelect => "product_select",
            VendingState::ProceedPayment => "proceed_payment",
            VendingState::OutOfStock => "out_of_stock",
        };
        f.write_str(name)
    }
}
